use proptest::prelude::*;
use runeops::{normalize, normalize_form, NormalizationForm, NormalizeConfig};
use unicode_normalization::UnicodeNormalization;

const FORMS: [NormalizationForm; 4] = [
    NormalizationForm::Nfc,
    NormalizationForm::Nfd,
    NormalizationForm::Nfkc,
    NormalizationForm::Nfkd,
];

// latin letters, combining marks, hangul jamo and syllables, ligatures,
// number forms, and a few singletons
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z \u{00C0}-\u{017F}\u{0300}-\u{036F}\u{1100}-\u{1112}\u{1161}-\u{1175}\u{11A8}-\u{11C2}\u{AC00}-\u{AC40}\u{FB00}-\u{FB06}\u{2150}-\u{218B}\u{212B}\u{2126}\u{0387}]{0,24}"
}

proptest! {
    #[test]
    fn prop_forms_are_idempotent(text in arb_text()) {
        for form in FORMS {
            let once = normalize_form(&text, form).unwrap();
            let twice = normalize_form(&once, form).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn prop_matches_reference_normalizer(text in arb_text()) {
        prop_assert_eq!(text.nfc().collect::<String>(), normalize_form(&text, NormalizationForm::Nfc).unwrap());
        prop_assert_eq!(text.nfd().collect::<String>(), normalize_form(&text, NormalizationForm::Nfd).unwrap());
        prop_assert_eq!(text.nfkc().collect::<String>(), normalize_form(&text, NormalizationForm::Nfkc).unwrap());
        prop_assert_eq!(text.nfkd().collect::<String>(), normalize_form(&text, NormalizationForm::Nfkd).unwrap());
    }

    #[test]
    fn prop_arbitrary_text_never_fails(text in any::<String>()) {
        for form in FORMS {
            prop_assert!(normalize_form(&text, form).is_ok());
        }
    }

    #[test]
    fn prop_nfd_of_nfc_is_nfd(text in arb_text()) {
        let nfc = normalize_form(&text, NormalizationForm::Nfc).unwrap();
        prop_assert_eq!(
            normalize_form(&text, NormalizationForm::Nfd).unwrap(),
            normalize_form(&nfc, NormalizationForm::Nfd).unwrap()
        );
    }

    #[test]
    fn prop_nfc_of_nfd_restores_nfc(text in arb_text()) {
        let nfc = normalize_form(&text, NormalizationForm::Nfc).unwrap();
        let nfd = normalize_form(&nfc, NormalizationForm::Nfd).unwrap();
        prop_assert_eq!(nfc, normalize_form(&nfd, NormalizationForm::Nfc).unwrap());
    }
}

#[test]
fn casefolded_comparison() {
    let config = NormalizeConfig {
        compat: true,
        casefold: true,
        strip_ignorable: true,
        ..NormalizeConfig::default()
    };
    let a = normalize("Ｆｏｏ\u{200B}Bar", &config).unwrap();
    let b = normalize("foobar", &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        normalize("Straße", &config).unwrap(),
        normalize("STRASSE", &config).unwrap()
    );
}

#[test]
fn form_names_round_trip() {
    for form in FORMS {
        assert_eq!(form, form.to_string().parse::<NormalizationForm>().unwrap());
    }
}
