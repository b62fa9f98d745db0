//! Tests for the reply markup codec.

use super::*;
use crate::codec::{decode_value, encode};
use serde_json::json;

fn roundtrip(value: serde_json::Value) -> ReplyMarkup {
    let first: ReplyMarkup = decode_value(value.clone()).unwrap();
    let encoded = encode(&first).unwrap();
    assert_eq!(encoded, value, "encode should reproduce the wire object");
    let second: ReplyMarkup = decode_value(encoded).unwrap();
    assert_eq!(first, second);
    first
}

#[test]
fn test_roundtrip_each_variant() {
    let keyboard = roundtrip(json!({
        "keyboard": [[{"text": "Yes"}, {"text": "No"}], [{"text": "Share", "request_contact": true}]],
        "resize_keyboard": true,
        "one_time_keyboard": false,
        "input_field_placeholder": "pick one"
    }));
    assert_eq!(keyboard.key(), "keyboard");

    let inline = roundtrip(json!({
        "inline_keyboard": [
            [{"text": "Open", "url": "https://example.com"}],
            [{"text": "Go", "callback_data": "go"}, {"text": "App", "web_app": {"url": "https://app.example.com"}}]
        ]
    }));
    assert_eq!(inline.key(), "inline_keyboard");

    let remove = roundtrip(json!({"remove_keyboard": true, "selective": true}));
    assert_eq!(remove, ReplyMarkup::RemoveKeyboard(ReplyKeyboardRemove { remove_keyboard: true, selective: Some(true) }));

    let force = roundtrip(json!({"force_reply": true, "input_field_placeholder": "why?"}));
    assert_eq!(force.key(), "force_reply");
}

#[test]
fn test_roundtrip_every_button_action() {
    roundtrip(json!({
        "inline_keyboard": [[
            {"text": "a", "callback_data": "x"},
            {"text": "b", "url": "https://example.com"},
            {"text": "c", "web_app": {"url": "https://w.example.com"}},
            {"text": "d", "login_url": {"url": "https://l.example.com", "request_write_access": true}},
            {"text": "e", "switch_inline_query": ""},
            {"text": "f", "switch_inline_query_current_chat": "q"},
            {"text": "g", "callback_game": {}},
            {"text": "h", "pay": true}
        ]]
    }));
}

#[test]
fn test_encode_emits_only_active_variant() {
    let markup: ReplyMarkup = ReplyKeyboardRemove::new().into();
    assert_eq!(encode(&markup).unwrap(), json!({"remove_keyboard": true}));

    let markup: ReplyMarkup = ForceReply::new().into();
    assert_eq!(encode(&markup).unwrap(), json!({"force_reply": true}));

    let markup: ReplyMarkup =
        InlineKeyboardMarkup::from(InlineKeyboardButton::callback_data("Hi", "hi")).into();
    assert_eq!(
        encode(&markup).unwrap(),
        json!({"inline_keyboard": [[{"text": "Hi", "callback_data": "hi"}]]})
    );
}

#[test]
fn test_button_constructors_emit_their_action_key() {
    let cases = [
        (
            InlineKeyboardButton::url("Docs", "https://example.com"),
            json!({"text": "Docs", "url": "https://example.com"}),
        ),
        (
            InlineKeyboardButton::web_app("App", "https://app.example.com"),
            json!({"text": "App", "web_app": {"url": "https://app.example.com"}}),
        ),
        (
            InlineKeyboardButton::switch_inline_query("Share", "cats"),
            json!({"text": "Share", "switch_inline_query": "cats"}),
        ),
        (
            InlineKeyboardButton::pay("Pay"),
            json!({"text": "Pay", "pay": true}),
        ),
    ];
    for (button, expected) in cases {
        assert_eq!(button.data(), None);
        assert_eq!(encode(&button).unwrap(), expected);
    }
}

#[test]
fn test_from_labels_builds_text_grid() {
    let markup = KeyboardReplyMarkup::from_labels([vec!["1", "2"], vec!["3"]]);
    assert_eq!(markup.keyboard.len(), 2);
    assert_eq!(markup.keyboard[0][1].text, "2");
    assert_eq!(markup.resize_keyboard, Some(true));
    let encoded = encode(&ReplyMarkup::from(markup)).unwrap();
    assert_eq!(encoded["keyboard"][1][0], json!({"text": "3"}));
    assert!(encoded.get("selective").is_none());
}

#[test]
fn test_keyboard_button_accepts_bare_string() {
    let markup: ReplyMarkup = decode_value(json!({"keyboard": [["plain", {"text": "rich"}]]})).unwrap();
    let kb = markup.as_keyboard().unwrap();
    assert_eq!(kb.keyboard[0][0], KeyboardButton::text("plain"));
    assert_eq!(kb.keyboard[0][1], KeyboardButton::text("rich"));
}

#[test]
fn test_multiple_variant_keys_pick_first_by_priority() {
    let markup: ReplyMarkup = decode_value(json!({
        "force_reply": true,
        "inline_keyboard": [[{"text": "x", "callback_data": "x"}]],
        "keyboard": [[{"text": "k"}]]
    }))
    .unwrap();
    assert_eq!(markup.key(), "keyboard");

    let markup: ReplyMarkup =
        decode_value(json!({"force_reply": true, "remove_keyboard": true})).unwrap();
    assert_eq!(markup.key(), "remove_keyboard");
}

#[test]
fn test_multiple_action_keys_pick_first_by_priority() {
    let button: InlineKeyboardButton = decode_value(json!({
        "text": "both",
        "url": "https://example.com",
        "callback_data": "cb"
    }))
    .unwrap();
    assert_eq!(button.action, InlineButtonAction::CallbackData("cb".into()));
    assert_eq!(button.data(), Some("cb"));
}

#[test]
fn test_unknown_fields_ignored() {
    let markup: ReplyMarkup = decode_value(json!({
        "inline_keyboard": [[{"text": "x", "url": "https://e.com", "icon": "star"}]],
        "style": "fancy"
    }))
    .unwrap();
    let inline = markup.as_inline_keyboard().unwrap();
    assert_eq!(inline.buttons().count(), 1);
}

#[test]
fn test_no_variant_key_is_an_error() {
    let err = decode_value::<ReplyMarkup>(json!({"selective": true})).unwrap_err();
    assert!(err.to_string().contains("reply markup has none of"), "{err}");
}

#[test]
fn test_button_without_action_is_an_error() {
    let err = decode_value::<InlineKeyboardButton>(json!({"text": "lonely"})).unwrap_err();
    assert!(err.to_string().contains("no action field"), "{err}");
}

#[test]
fn test_button_without_text_is_an_error() {
    let err = decode_value::<InlineKeyboardButton>(json!({"url": "https://e.com"})).unwrap_err();
    assert!(err.to_string().contains("missing field `text`"), "{err}");
}

#[test]
fn test_action_type_mismatch_names_field() {
    let err = decode_value::<ReplyMarkup>(json!({
        "inline_keyboard": [[{"text": "x", "callback_data": 42}]]
    }))
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("callback_data"), "{msg}");
    assert!(msg.contains("expected a string"), "{msg}");
}

#[test]
fn test_non_object_markup_is_an_error() {
    assert!(decode_value::<ReplyMarkup>(json!([1, 2])).is_err());
    assert!(decode_value::<ReplyMarkup>(json!("keyboard")).is_err());
}
