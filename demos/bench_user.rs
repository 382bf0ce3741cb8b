//! Timing run: the concurrent codec against serde_json and bincode.
//!
//! Usage:
//! cargo run --release --example bench_user
//!
//! `PARJSON_WORKERS` fixes the pool size, `RUST_LOG=parjson=debug` shows the
//! per-call events.

#![allow(missing_docs)]
use parjson::{ParjsonOptions, User};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const CHILD_COUNT: usize = 10_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let user = User::sample(CHILD_COUNT);
    let options = ParjsonOptions::from_env()?;

    let encoder = options.encoder()?;
    let decoder = options.decoder()?;
    println!("--- parjson ({} workers, {} children) ---", encoder.workers(), CHILD_COUNT);

    let (json, encode_time) = timed(|| encoder.encode(&user));
    let json = json?;
    println!("Encoded {} bytes", json.len());

    let (decoded, decode_time) = timed(|| decoder.decode(&json));
    let decoded = decoded?;
    assert_eq!(decoded, user, "round-trip mismatch");

    println!("parjson Encode Time: {} ms", encode_time.as_millis());
    println!("parjson Decode Time: {} ms", decode_time.as_millis());

    encoder.shutdown();
    decoder.shutdown();

    compare_libraries(&user)?;
    Ok(())
}

fn compare_libraries(user: &User) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n--- Off-the-shelf libraries ---");

    let (json, serde_json_encode) = timed(|| serde_json::to_string(user));
    let json = json?;
    let (back, serde_json_decode) = timed(|| serde_json::from_str::<User>(&json));
    back?;

    let config = bincode::config::standard();
    let (bytes, bincode_encode) = timed(|| bincode::serde::encode_to_vec(user, config));
    let bytes = bytes?;
    let (back, bincode_decode) =
        timed(|| bincode::serde::decode_from_slice::<User, _>(&bytes, config));
    back?;

    println!("serde_json Serialization Time: {} ms", serde_json_encode.as_millis());
    println!("serde_json Deserialization Time: {} ms", serde_json_decode.as_millis());
    println!("bincode Serialization Time: {} ms", bincode_encode.as_millis());
    println!("bincode Deserialization Time: {} ms", bincode_decode.as_millis());
    Ok(())
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}
