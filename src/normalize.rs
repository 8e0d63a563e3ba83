//! Unicode normalization with configurable options.
//!
//! A [`NormalizeConfig`] is the caller's request: a set of independent
//! switches, some of which only make sense together. Validating it yields
//! an immutable [`NormalizeOptions`], which is what the
//! [`Normalizer`] and the [`UnicodeData`] service work from.
//!
//! ```
//! use runeops::{normalize, NormalizeConfig};
//!
//! let config = NormalizeConfig {
//!     compose: false,
//!     decompose: true,
//!     strip_mark: true,
//!     ..NormalizeConfig::default()
//! };
//! assert_eq!("Ecole", normalize("École", &config).unwrap());
//! ```

use crate::{
    error::{Error, Result},
    ucd::Tables,
    UnicodeData,
};
use std::{fmt, str::FromStr};
use tracing::{debug, trace};

/// What newline sequences (`CR LF`, `LF`, `CR`, `NEL`) are converted to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NewlineMode {
    /// Leave newlines alone.
    #[default]
    None,
    /// U+2028 LINE SEPARATOR.
    Ls,
    /// U+2029 PARAGRAPH SEPARATOR.
    Ps,
    /// U+000A LINE FEED.
    Lf,
}

/// The four standard normalization forms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NormalizationForm {
    /// Canonical decomposition followed by canonical composition.
    Nfc,
    /// Canonical decomposition.
    Nfd,
    /// Compatibility decomposition followed by canonical composition.
    Nfkc,
    /// Compatibility decomposition.
    Nfkd,
}

impl NormalizationForm {
    /// The option set this form stands for.
    pub fn config(self) -> NormalizeConfig<'static> {
        let (compose, compat) = match self {
            NormalizationForm::Nfc => (true, false),
            NormalizationForm::Nfd => (false, false),
            NormalizationForm::Nfkc => (true, true),
            NormalizationForm::Nfkd => (false, true),
        };
        NormalizeConfig {
            stable: true,
            compose,
            decompose: !compose,
            compat,
            ..NormalizeConfig::default()
        }
    }
}

impl FromStr for NormalizationForm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NFC" => Ok(NormalizationForm::Nfc),
            "NFD" => Ok(NormalizationForm::Nfd),
            "NFKC" => Ok(NormalizationForm::Nfkc),
            "NFKD" => Ok(NormalizationForm::Nfkd),
            _ => Err(Error::Configuration(format!(
                "unknown normalization form {:?}, expected NFC, NFD, NFKC or NFKD",
                s
            ))),
        }
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NormalizationForm::Nfc => "NFC",
            NormalizationForm::Nfd => "NFD",
            NormalizationForm::Nfkc => "NFKC",
            NormalizationForm::Nfkd => "NFKD",
        };
        f.write_str(text)
    }
}

/// A normalization request.
///
/// The default composes canonically and does nothing else.
#[derive(Clone, Copy)]
pub struct NormalizeConfig<'a> {
    /// Keep results stable across Unicode versions. Compositions excluded
    /// from normalization are never produced either way.
    pub stable: bool,
    /// Use compatibility decompositions.
    pub compat: bool,
    /// Recompose after decomposing.
    pub compose: bool,
    /// Decompose only.
    pub decompose: bool,
    /// Remove default-ignorable codepoints.
    pub strip_ignorable: bool,
    /// Fail on unassigned codepoints.
    pub reject_unassigned: bool,
    /// Convert newlines to U+2028.
    pub newline_to_ls: bool,
    /// Convert newlines to U+2029.
    pub newline_to_ps: bool,
    /// Convert newlines to U+000A.
    pub newline_to_lf: bool,
    /// Remove control characters; tabs become spaces.
    pub strip_control: bool,
    /// Apply case folding.
    pub casefold: bool,
    /// Fold look-alike punctuation and spaces to ASCII.
    pub lump: bool,
    /// Remove combining marks. Requires `compose` or `decompose`.
    pub strip_mark: bool,
    /// Applied once to every input character before anything else.
    pub transform: Option<&'a dyn Fn(char) -> char>,
}

impl Default for NormalizeConfig<'_> {
    fn default() -> Self {
        NormalizeConfig {
            stable: false,
            compat: false,
            compose: true,
            decompose: false,
            strip_ignorable: false,
            reject_unassigned: false,
            newline_to_ls: false,
            newline_to_ps: false,
            newline_to_lf: false,
            strip_control: false,
            casefold: false,
            lump: false,
            strip_mark: false,
            transform: None,
        }
    }
}

impl<'a> From<NormalizationForm> for NormalizeConfig<'a> {
    fn from(form: NormalizationForm) -> Self {
        form.config()
    }
}

impl<'a> NormalizeConfig<'a> {
    /// Sets the per-character transform hook.
    pub fn with_transform(mut self, transform: &'a dyn Fn(char) -> char) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Checks the combination of switches, producing the option set.
    pub fn build(&self) -> Result<NormalizeOptions<'a>> {
        if self.compose && self.decompose {
            return Err(configuration_error(
                "compose and decompose are mutually exclusive; set compose: false to decompose only",
            ));
        }
        if !self.compose && !self.decompose && (self.compat || self.strip_mark) {
            return Err(configuration_error(
                "compat or stripMark requires compose or decompose",
            ));
        }
        let newline = match (self.newline_to_ls, self.newline_to_ps, self.newline_to_lf) {
            (false, false, false) => NewlineMode::None,
            (true, false, false) => NewlineMode::Ls,
            (false, true, false) => NewlineMode::Ps,
            (false, false, true) => NewlineMode::Lf,
            _ => return Err(configuration_error("only one newline conversion may be specified")),
        };
        Ok(NormalizeOptions {
            stable: self.stable,
            compat: self.compat,
            compose: self.compose,
            decompose: self.decompose,
            strip_ignorable: self.strip_ignorable,
            reject_unassigned: self.reject_unassigned,
            newline,
            strip_control: self.strip_control,
            casefold: self.casefold,
            lump: self.lump,
            strip_mark: self.strip_mark,
            transform: self.transform,
        })
    }
}

fn configuration_error(message: &str) -> Error {
    debug!(reason = message, "rejected normalization configuration");
    Error::Configuration(message.to_string())
}

impl fmt::Debug for NormalizeConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizeConfig")
            .field("stable", &self.stable)
            .field("compat", &self.compat)
            .field("compose", &self.compose)
            .field("decompose", &self.decompose)
            .field("strip_ignorable", &self.strip_ignorable)
            .field("reject_unassigned", &self.reject_unassigned)
            .field("newline_to_ls", &self.newline_to_ls)
            .field("newline_to_ps", &self.newline_to_ps)
            .field("newline_to_lf", &self.newline_to_lf)
            .field("strip_control", &self.strip_control)
            .field("casefold", &self.casefold)
            .field("lump", &self.lump)
            .field("strip_mark", &self.strip_mark)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// A validated, immutable set of normalization options.
#[derive(Clone, Copy)]
pub struct NormalizeOptions<'a> {
    stable: bool,
    compat: bool,
    compose: bool,
    decompose: bool,
    strip_ignorable: bool,
    reject_unassigned: bool,
    newline: NewlineMode,
    strip_control: bool,
    casefold: bool,
    lump: bool,
    strip_mark: bool,
    transform: Option<&'a dyn Fn(char) -> char>,
}

impl<'a> NormalizeOptions<'a> {
    /// Options for one of the standard forms.
    pub fn from_form(form: NormalizationForm) -> Self {
        let config = form.config();
        NormalizeOptions {
            stable: config.stable,
            compat: config.compat,
            compose: config.compose,
            decompose: config.decompose,
            strip_ignorable: false,
            reject_unassigned: false,
            newline: NewlineMode::None,
            strip_control: false,
            casefold: false,
            lump: false,
            strip_mark: false,
            transform: None,
        }
    }

    /// Whether results must stay stable across Unicode versions.
    pub fn stable(&self) -> bool {
        self.stable
    }
    /// Whether compatibility decompositions apply.
    pub fn compat(&self) -> bool {
        self.compat
    }
    /// Whether the result is recomposed.
    pub fn compose(&self) -> bool {
        self.compose
    }
    /// Whether the result stays decomposed.
    pub fn decompose(&self) -> bool {
        self.decompose
    }
    /// Whether default ignorable codepoints are dropped.
    pub fn strip_ignorable(&self) -> bool {
        self.strip_ignorable
    }
    /// Whether unassigned codepoints are an error.
    pub fn reject_unassigned(&self) -> bool {
        self.reject_unassigned
    }
    /// How newline sequences are converted.
    pub fn newline(&self) -> NewlineMode {
        self.newline
    }
    /// Whether control characters are dropped.
    pub fn strip_control(&self) -> bool {
        self.strip_control
    }
    /// Whether full case folding applies.
    pub fn casefold(&self) -> bool {
        self.casefold
    }
    /// Whether look-alike punctuation folds to ASCII.
    pub fn lump(&self) -> bool {
        self.lump
    }
    /// Whether combining marks are dropped.
    pub fn strip_mark(&self) -> bool {
        self.strip_mark
    }

    /// Whether a transform hook is configured.
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }
}

impl fmt::Debug for NormalizeOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizeOptions")
            .field("stable", &self.stable)
            .field("compat", &self.compat)
            .field("compose", &self.compose)
            .field("decompose", &self.decompose)
            .field("strip_ignorable", &self.strip_ignorable)
            .field("reject_unassigned", &self.reject_unassigned)
            .field("newline", &self.newline)
            .field("strip_control", &self.strip_control)
            .field("casefold", &self.casefold)
            .field("lump", &self.lump)
            .field("strip_mark", &self.strip_mark)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Runs the decompose / size / fill / re-encode pipeline against a
/// [`UnicodeData`] service.
#[derive(Copy, Clone, Debug, Default)]
pub struct Normalizer<D = Tables> {
    data: D,
}

impl Normalizer<Tables> {
    /// A normalizer using the built-in tables.
    pub const fn new() -> Self {
        Normalizer { data: Tables }
    }
}

impl<D: UnicodeData> Normalizer<D> {
    /// A normalizer using the given Unicode data.
    pub const fn with_data(data: D) -> Self {
        Normalizer { data }
    }

    /// Normalizes `text`. Either the whole result is returned or an error;
    /// nothing is produced partially.
    pub fn normalize(&self, text: &str, options: &NormalizeOptions<'_>) -> Result<String> {
        // The hook runs exactly once per input character, so the sizing
        // and filling passes below see the same input.
        let input: Vec<char> = match options.transform {
            Some(transform) => text.chars().map(transform).collect(),
            None => text.chars().collect(),
        };

        let sized = self.data.decompose(&input, options, &mut []).map_err(|err| {
            debug!(%err, "decomposition sizing failed");
            Error::from(err)
        })?;
        trace!(input = input.len(), decomposed = sized, "sized decomposition");

        let mut buffer = vec![0u32; sized];
        let filled = self.data.decompose(&input, options, &mut buffer)?;
        if filled != sized {
            debug!(sized, filled, "decomposition size changed between passes");
            return Err(Error::Normalization(format!(
                "decomposition produced {} codepoints after sizing {}",
                filled, sized
            )));
        }

        let len = self.data.reencode(&mut buffer, options).map_err(|err| {
            debug!(%err, "re-encoding failed");
            Error::from(err)
        })?;
        let scalars = buffer.get(..len).ok_or_else(|| {
            Error::Normalization(format!("re-encoding reported {} of {} codepoints", len, sized))
        })?;

        let mut out = String::with_capacity(len * 4);
        for &value in scalars {
            let ch = char::from_u32(value).ok_or_else(|| {
                Error::Normalization(format!("U+{:04X} is not a scalar value", value))
            })?;
            out.push(ch);
        }
        Ok(out)
    }

    /// Normalizes `text` to one of the standard forms.
    pub fn normalize_form(&self, text: &str, form: NormalizationForm) -> Result<String> {
        self.normalize(text, &NormalizeOptions::from_form(form))
    }
}

/// Normalizes `text` according to `config`, using the built-in tables.
pub fn normalize(text: &str, config: &NormalizeConfig<'_>) -> Result<String> {
    let options = config.build()?;
    Normalizer::new().normalize(text, &options)
}

/// Normalizes `text` to one of the standard forms.
pub fn normalize_form(text: &str, form: NormalizationForm) -> Result<String> {
    Normalizer::new().normalize_form(text, form)
}

/// Normalizes `text` to the form named `name` (`"NFC"`, `"NFD"`,
/// `"NFKC"` or `"NFKD"`, in any case).
pub fn normalize_named(text: &str, name: &str) -> Result<String> {
    let form = name.parse::<NormalizationForm>()?;
    normalize_form(text, form)
}
