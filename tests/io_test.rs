#![allow(missing_docs)]

use parjson::{Parjson, User};
use std::fs::File;
use std::io::BufReader;

// --- TESTS ---

/// Encode to a file, decode from the same file.
#[test]
fn test_file_round_trip() -> parjson::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("user.json");
    let user = User::sample(1_000);

    let encoder = Parjson::builder().workers(2).encoder()?;
    let decoder = Parjson::builder().workers(2).decoder()?;

    encoder.encode_to_writer(&user, File::create(&path)?)?;
    let loaded = decoder.decode_from_reader(BufReader::new(File::open(&path)?))?;

    assert_eq!(loaded, user);
    Ok(())
}

/// In-memory buffers
#[test]
fn test_buffer_round_trip() -> parjson::Result<()> {
    let user = User::sample(10);
    let encoder = Parjson::builder().encoder()?;
    let decoder = Parjson::builder().decoder()?;

    let mut buffer = Vec::new();
    encoder.encode_to_writer(&user, &mut buffer)?;
    assert_eq!(buffer, encoder.encode(&user)?.into_bytes());

    let loaded = decoder.decode_from_reader(buffer.as_slice())?;
    assert_eq!(loaded, user);
    Ok(())
}

#[test]
fn test_invalid_utf8_is_io_error() -> parjson::Result<()> {
    let decoder = Parjson::builder().workers(1).decoder()?;
    let err = decoder
        .decode_from_reader(&[0xff_u8, 0xfe, 0xfd][..])
        .expect_err("not UTF-8");
    assert!(matches!(err, parjson::ParjsonError::Io(_)));
    Ok(())
}
