mod common;

use datafpe::keys::unwrap_data_key;
use datafpe::{DatasetContext, Error, KeyCache};

#[test]
fn unwraps_the_fixture_data_key() {
    let key = unwrap_data_key(
        common::ENCRYPTED_PRIVATE_KEY,
        common::PASSPHRASE,
        common::WRAPPED_DATA_KEY,
    )
    .unwrap();
    assert_eq!(hex::encode(&key[..]), common::DATA_KEY_HEX);
}

#[test]
fn wrong_passphrase_is_malformed_input() {
    let err = unwrap_data_key(
        common::ENCRYPTED_PRIVATE_KEY,
        "open-sesame",
        common::WRAPPED_DATA_KEY,
    )
    .unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn corrupted_wrapped_key_is_malformed_input() {
    let mut tampered = String::from(common::WRAPPED_DATA_KEY);
    tampered.replace_range(0..2, "AA");
    let err = unwrap_data_key(
        common::ENCRYPTED_PRIVATE_KEY,
        common::PASSPHRASE,
        &tampered,
    )
    .unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn context_construction_unwraps_cached_keys() {
    let dataset = datafpe::Dataset::from_json(
        r#"{
            "name": "card",
            "encryption_algorithm": "FF1",
            "passthrough": " ",
            "input_character_set": "0123456789",
            "output_character_set": "0123456789",
            "tweak": ""
        }"#,
    )
    .unwrap();

    let cache = KeyCache {
        encrypted_private_key: common::ENCRYPTED_PRIVATE_KEY.into(),
        keys: vec![common::WRAPPED_DATA_KEY.into()],
        current_key_number: 0,
        current_key_only: false,
    };

    let ctx =
        DatasetContext::new(dataset.clone(), &cache, common::PASSPHRASE)
            .unwrap();
    let ct = ctx.encrypt("4111 1111 1111 1111", None).unwrap();
    assert_eq!(ctx.decrypt(&ct, None).unwrap(), "4111 1111 1111 1111");

    // same raw key, same ciphertext
    let raw = hex::decode(common::DATA_KEY_HEX).unwrap();
    let direct =
        DatasetContext::with_raw_keys(dataset, &[raw], 0, false).unwrap();
    assert_eq!(direct.encrypt("4111 1111 1111 1111", None).unwrap(), ct);
}

#[test]
fn construction_fails_cleanly_on_bad_key_material() {
    let dataset = datafpe::Dataset::from_json(
        r#"{
            "name": "card",
            "encryption_algorithm": "FF1",
            "input_character_set": "0123456789",
            "output_character_set": "0123456789",
            "tweak": ""
        }"#,
    )
    .unwrap();

    let cache = KeyCache {
        encrypted_private_key: "garbage".into(),
        keys: vec![common::WRAPPED_DATA_KEY.into()],
        current_key_number: 0,
        current_key_only: false,
    };

    let err = DatasetContext::new(dataset, &cache, common::PASSPHRASE)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}
