use proptest::prelude::*;
use runeops::{
    category, is_space, lowercase, lowercase_str, titlecase_str, uppercase, uppercase_str,
    AnnotatedString, Category, Codepoint, TitleCase,
};

#[test]
fn titlecases_words() {
    assert_eq!(
        "The Julia Programming Language",
        titlecase_str("the julia programming language")
    );
    assert_eq!(
        "ISS - International Space Station",
        TitleCase::new()
            .strict(false)
            .apply("ISS - international space station")
    );
    assert_eq!("A-a B-b", TitleCase::new().separator(is_space).apply("a-a b-b"));
}

#[test]
fn titlecase_keeps_annotations_on_their_words() {
    let mut text = AnnotatedString::new();
    text.push_annotated("ǳiɛ", "first");
    text.push_str(" ");
    text.push_annotated("ĳssel", "second");
    let titled = TitleCase::new().apply_annotated(&text);
    assert_eq!(titled, "ǲiɛ Ĳssel");
    for (before, after) in text.annotations().iter().zip(titled.annotations()) {
        assert_eq!(before.value, after.value);
        assert_eq!(&text[before.range.clone()], lowercase_str(&titled[after.range.clone()]));
    }
}

#[test]
fn categories() {
    assert_eq!(Category::DecimalNumber, category('9'));
    assert_eq!(Category::LowercaseLetter, category('α'));
    assert_eq!(Category::TooHigh, category(Codepoint::from_u32(0x11_0000)));
    assert_eq!("Zs: Separator, space", category('\u{3000}').to_string());
}

proptest! {
    #[test]
    fn prop_ascii_case_round_trip(c in proptest::char::range('A', 'z')) {
        prop_assert_eq!(uppercase(c), uppercase(lowercase(c)));
    }

    #[test]
    fn prop_string_case_keeps_char_count(text in any::<String>()) {
        prop_assert_eq!(text.chars().count(), uppercase_str(&text).chars().count());
        prop_assert_eq!(text.chars().count(), titlecase_str(&text).chars().count());
    }
}
