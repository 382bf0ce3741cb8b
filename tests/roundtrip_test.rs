#![allow(missing_docs)]

use parjson::{Address, Child, Decoder, Encoder, Parjson, User};

fn ann() -> User {
    User::new("Ann", 30, Address::new("X", "Y"), vec![Child::new("Bo", 5)])
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn codec(workers: usize) -> parjson::Result<(Encoder, Decoder)> {
    let options = Parjson::builder().workers(workers);
    Ok((options.encoder()?, options.decoder()?))
}

// --- TESTS ---

#[test]
fn test_small_user_text() -> parjson::Result<()> {
    let (encoder, decoder) = codec(2)?;
    let user = ann();

    let text = encoder.encode(&user)?;
    assert_eq!(
        strip_whitespace(&text),
        r#"{"name":"Ann","age":30,"address":{"city":"X","street":"Y"},"children":[{"name":"Bo","age":5}]}"#
    );
    assert_eq!(decoder.decode(&text)?, user);

    encoder.shutdown();
    decoder.shutdown();
    Ok(())
}

#[test]
fn test_exact_layout() -> parjson::Result<()> {
    let user = User::new(
        "Ann",
        30,
        Address::new("X", "Y"),
        vec![Child::new("Bo", 5), Child::new("Cy", 7)],
    );
    let text = Parjson::encode(&user)?;

    let expected = "{\n    \"name\": \"Ann\",\n    \"age\": 30,\n    \"address\": {\n        \"city\": \"X\",\n        \"street\": \"Y\"\n    },\n    \"children\": [{\"name\": \"Bo\", \"age\": 5}, {\"name\": \"Cy\", \"age\": 7}]\n}";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn test_empty_children() -> parjson::Result<()> {
    let user = User::new("Solo", 41, Address::new("Oslo", "Main"), Vec::new());
    let text = Parjson::encode(&user)?;

    assert!(text.contains("\"children\": []"));
    assert_eq!(Parjson::decode(&text)?, user);
    Ok(())
}

#[test]
fn test_unicode_and_negative_values() -> parjson::Result<()> {
    let user = User::new(
        "Иван Иванов",
        -1,
        Address::new("Москва", "Тверская 7, кв. 12"),
        vec![Child::new("Мария", i32::MAX), Child::new("😀 emoji", i32::MIN)],
    );
    let text = Parjson::encode(&user)?;
    assert_eq!(Parjson::decode(&text)?, user);
    Ok(())
}

#[test]
fn test_backslash_is_kept_verbatim() -> parjson::Result<()> {
    let user = User::new("C:\\Users\\ann", 1, Address::new("a\\nb", "tab\there"), Vec::new());
    let text = Parjson::encode(&user)?;

    assert!(text.contains("C:\\Users\\ann"));
    assert_eq!(Parjson::decode(&text)?, user);
    Ok(())
}

#[test]
fn test_quote_in_string_breaks_round_trip() -> parjson::Result<()> {
    // Strings are not escaped, so an embedded quote corrupts the text.
    let user = User::new("say \"hi\"", 1, Address::new("X", "Y"), Vec::new());
    let text = Parjson::encode(&user)?;

    assert!(Parjson::decode(&text).is_err());
    Ok(())
}

#[test]
fn test_ten_thousand_children_keep_order() -> parjson::Result<()> {
    let (encoder, decoder) = codec(4)?;
    let user = User::sample(10_000);

    let decoded = decoder.decode(&encoder.encode(&user)?)?;

    assert_eq!(decoded.children.len(), 10_000);
    for (i, child) in decoded.children.iter().enumerate() {
        assert_eq!(child.name, format!("Child {i}"), "entry {i} moved");
        assert_eq!(child, &user.children[i]);
    }
    assert_eq!(decoded, user);
    Ok(())
}

#[test]
fn test_distinct_ages_keep_position() -> parjson::Result<()> {
    let children: Vec<Child> = (0..2_000).map(|i| Child::new(format!("c{i}"), 3 * i - 1000)).collect();
    let user = User::new("Ages", 50, Address::new("A", "B"), children);

    let decoded = Parjson::decode(&Parjson::encode(&user)?)?;

    for (i, (before, after)) in user.children.iter().zip(&decoded.children).enumerate() {
        assert_eq!(before.age, after.age, "age at {i}");
        assert_eq!(before.name, after.name, "name at {i}");
    }
    Ok(())
}

#[test]
fn test_output_independent_of_worker_count() -> parjson::Result<()> {
    let user = User::sample(3_000);
    let max = parjson::api::available_parallelism();

    let (reference_encoder, _) = codec(1)?;
    let reference = reference_encoder.encode(&user)?;

    for workers in [1, 2, max] {
        let (encoder, decoder) = codec(workers)?;
        for _ in 0..3 {
            let text = encoder.encode(&user)?;
            assert_eq!(text, reference, "{workers} workers changed the bytes");
            assert_eq!(decoder.decode(&text)?, user);
        }
        encoder.shutdown();
        decoder.shutdown();
    }
    Ok(())
}

#[test]
fn test_reused_instances() -> parjson::Result<()> {
    let (encoder, decoder) = codec(2)?;
    for n in [0, 1, 17, 500] {
        let user = User::sample(n);
        assert_eq!(decoder.decode(&encoder.encode(&user)?)?, user);
    }
    Ok(())
}

#[test]
fn test_decodes_compact_serde_json_output() -> parjson::Result<()> {
    let user = User::sample(50);
    let text = serde_json::to_string(&user).expect("serde_json failed");

    assert_eq!(Parjson::decode(&text)?, user);
    Ok(())
}
