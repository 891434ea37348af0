//! Locale metadata: flags, preview sentences and voice descriptions.
//!
//! Everything here is a pure lookup. Each function is total: unknown input
//! falls through to a generic value rather than an error.

use crate::types::Voice;

/// Glyph used when no flag is known for a locale.
pub const GLOBE: &str = "🌐";

/// Description used when no heuristic matches a voice.
pub const GENERIC_DESCRIPTION: &str = "Natural voice with clear pronunciation";

// ============================================================================
// Locale Tags
// ============================================================================

/// Normalize a locale tag to BCP-47 casing.
///
/// Accepts `_` or `-` separators. The language subtag is lowercased, two
/// letter regions are uppercased, four letter scripts are titlecased and
/// anything else is lowercased.
///
/// ## Examples
///
/// ```
/// use read_aloud::locale::normalize_locale;
///
/// assert_eq!(normalize_locale("en_gb"), "en-GB");
/// assert_eq!(normalize_locale("zh-hant-tw"), "zh-Hant-TW");
/// assert_eq!(normalize_locale("cmn"), "cmn");
/// ```
pub fn normalize_locale(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(index, part)| {
            if index == 0 {
                part.to_ascii_lowercase()
            } else if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                part.to_ascii_uppercase()
            } else if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                let lower = part.to_ascii_lowercase();
                let mut chars = lower.chars();
                chars
                    .next()
                    .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                    .unwrap_or_default()
            } else {
                part.to_ascii_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// The language part of a locale tag (everything before the first `-`),
/// lowercased.
pub fn language_prefix(tag: &str) -> String {
    tag.split(['-', '_'])
        .next()
        .unwrap_or(tag)
        .trim()
        .to_ascii_lowercase()
}

// ============================================================================
// Flags
// ============================================================================

/// Flag glyph for a locale tag.
///
/// Tries the full tag first, then the language prefix, then falls back to
/// [`GLOBE`]. Never returns an empty string.
///
/// ## Examples
///
/// ```
/// use read_aloud::locale::{flag_for, GLOBE};
///
/// assert_eq!(flag_for("en-GB"), "🇬🇧");
/// assert_eq!(flag_for("de"), "🇩🇪");
/// assert_eq!(flag_for("xx-YY"), GLOBE);
/// assert_eq!(flag_for(""), GLOBE);
/// ```
pub fn flag_for(locale: &str) -> &'static str {
    let tag = normalize_locale(locale);
    full_tag_flag(&tag)
        .or_else(|| prefix_flag(&language_prefix(&tag)))
        .unwrap_or(GLOBE)
}

fn full_tag_flag(tag: &str) -> Option<&'static str> {
    let flag = match tag {
        "en-US" => "🇺🇸",
        "en-GB" => "🇬🇧",
        "en-AU" => "🇦🇺",
        "en-CA" => "🇨🇦",
        "en-IE" => "🇮🇪",
        "en-ZA" => "🇿🇦",
        "en-IN" => "🇮🇳",
        "en-NZ" => "🇳🇿",
        "fr-FR" => "🇫🇷",
        "fr-CA" => "🇨🇦",
        "fr-BE" => "🇧🇪",
        "fr-CH" => "🇨🇭",
        "es-ES" => "🇪🇸",
        "es-MX" => "🇲🇽",
        "es-AR" => "🇦🇷",
        "es-CO" => "🇨🇴",
        "es-CL" => "🇨🇱",
        "de-DE" => "🇩🇪",
        "de-AT" => "🇦🇹",
        "de-CH" => "🇨🇭",
        "it-IT" => "🇮🇹",
        "pt-PT" => "🇵🇹",
        "pt-BR" => "🇧🇷",
        "nl-NL" => "🇳🇱",
        "nl-BE" => "🇧🇪",
        "sv-SE" => "🇸🇪",
        "da-DK" => "🇩🇰",
        "no-NO" => "🇳🇴",
        "fi-FI" => "🇫🇮",
        "pl-PL" => "🇵🇱",
        "cs-CZ" => "🇨🇿",
        "sk-SK" => "🇸🇰",
        "hu-HU" => "🇭🇺",
        "ro-RO" => "🇷🇴",
        "bg-BG" => "🇧🇬",
        "hr-HR" => "🇭🇷",
        "sl-SI" => "🇸🇮",
        "et-EE" => "🇪🇪",
        "lv-LV" => "🇱🇻",
        "lt-LT" => "🇱🇹",
        "el-GR" => "🇬🇷",
        "tr-TR" => "🇹🇷",
        "ru-RU" => "🇷🇺",
        "uk-UA" => "🇺🇦",
        "ja-JP" => "🇯🇵",
        "ko-KR" => "🇰🇷",
        "zh-CN" => "🇨🇳",
        "zh-TW" => "🇹🇼",
        "zh-HK" => "🇭🇰",
        "th-TH" => "🇹🇭",
        "vi-VN" => "🇻🇳",
        "bn-BD" => "🇧🇩",
        "ur-PK" => "🇵🇰",
        "hi-IN" | "ta-IN" | "te-IN" | "ml-IN" | "kn-IN" | "gu-IN" | "pa-IN" | "mr-IN"
        | "or-IN" | "as-IN" => "🇮🇳",
        "ar-SA" => "🇸🇦",
        "ar-EG" => "🇪🇬",
        "ar-AE" => "🇦🇪",
        "ar-MA" => "🇲🇦",
        "he-IL" => "🇮🇱",
        "fa-IR" => "🇮🇷",
        "sw-KE" => "🇰🇪",
        "am-ET" => "🇪🇹",
        "zu-ZA" | "af-ZA" => "🇿🇦",
        "id-ID" => "🇮🇩",
        "ms-MY" => "🇲🇾",
        "tl-PH" => "🇵🇭",
        _ => return None,
    };
    Some(flag)
}

/// Bare language codes whose flag is unambiguous.
///
/// Languages spoken across many countries (en, es, pt, ar, zh, ...) are left
/// out on purpose so they fall through to the globe.
fn prefix_flag(prefix: &str) -> Option<&'static str> {
    let flag = match prefix {
        "fr" => "🇫🇷",
        "de" => "🇩🇪",
        "it" => "🇮🇹",
        "nl" => "🇳🇱",
        "sv" => "🇸🇪",
        "da" => "🇩🇰",
        "fi" => "🇫🇮",
        "pl" => "🇵🇱",
        "cs" => "🇨🇿",
        "el" => "🇬🇷",
        "tr" => "🇹🇷",
        "ru" => "🇷🇺",
        "uk" => "🇺🇦",
        "ja" => "🇯🇵",
        "ko" => "🇰🇷",
        "th" => "🇹🇭",
        "vi" => "🇻🇳",
        "he" => "🇮🇱",
        _ => return None,
    };
    Some(flag)
}

// ============================================================================
// Preview Sentences
// ============================================================================

/// The English preview sentence, also used for unknown languages.
pub const ENGLISH_PREVIEW: &str =
    "Hello, this is a voice preview. How do you like the sound of this voice?";

/// A short sentence in the locale's language for previewing a voice.
///
/// ## Examples
///
/// ```
/// use read_aloud::locale::{preview_text_for, ENGLISH_PREVIEW};
///
/// assert!(preview_text_for("fr-CA").starts_with("Bonjour"));
/// assert_eq!(preview_text_for("xx"), ENGLISH_PREVIEW);
/// ```
pub fn preview_text_for(locale: &str) -> &'static str {
    match language_prefix(locale).as_str() {
        "es" => "Hola, esta es una vista previa de voz. ¿Cómo te gusta el sonido de esta voz?",
        "fr" => "Bonjour, ceci est un aperçu vocal. Comment aimez-vous le son de cette voix?",
        "de" => "Hallo, das ist eine Stimmvorschau. Wie gefällt Ihnen der Klang dieser Stimme?",
        "it" => "Ciao, questa è un'anteprima vocale. Come ti piace il suono di questa voce?",
        "pt" => "Olá, esta é uma prévia de voz. Como você gosta do som desta voz?",
        "ja" => "こんにちは、これは音声プレビューです。この声の音はいかがですか？",
        "ko" => "안녕하세요, 이것은 음성 미리보기입니다. 이 목소리의 소리가 어떠신가요?",
        "zh" => "你好，这是语音预览。你觉得这个声音怎么样？",
        "ar" => "مرحبا، هذه معاينة صوتية. كيف يعجبك صوت هذا الصوت؟",
        "hi" => "नमस्ते, यह एक आवाज़ पूर्वावलोकन है। आपको इस आवाज़ की आवाज़ कैसी लगती है?",
        "ru" => "Привет, это предварительный просмотр голоса. Как вам нравится звук этого голоса?",
        "nl" => "Hallo, dit is een stemvoorbeeld. Hoe vind je het geluid van deze stem?",
        "sv" => "Hej, det här är en röstförhandsvisning. Hur tycker du om ljudet av denna röst?",
        "th" => "สวัสดี นี่คือการแสดงตัวอย่างเสียง คุณชอบเสียงนี้ไหม?",
        "vi" => "Xin chào, đây là bản xem trước giọng nói. Bạn thích âm thanh của giọng nói này như thế nào?",
        _ => ENGLISH_PREVIEW,
    }
}

// ============================================================================
// Voice Descriptions
// ============================================================================

const FEMININE_KEYWORDS: &[&str] = &[
    "female", "woman", "sophia", "emma", "olivia", "aria", "jenny", "hazel",
];

const MASCULINE_KEYWORDS: &[&str] = &[
    "male", "man", "david", "ryan", "brian", "guy", "mark", "daniel",
];

/// Locale rules checked in order once no name rule matched.
///
/// A rule with a region (`en-gb`) matches that tag and its subtags; a bare
/// language (`es`) matches on the language prefix only.
const LOCALE_DESCRIPTIONS: &[(&[&str], &str)] = &[
    (
        &["en-gb", "en-au"],
        "Sophisticated English accent with clear articulation",
    ),
    (&["en-us"], "Standard American English voice with neutral accent"),
    (&["fr"], "Elegant French voice with authentic pronunciation"),
    (&["es"], "Warm Spanish voice with natural rhythm and flow"),
    (&["de"], "Precise German voice with clear consonants"),
    (&["it"], "Melodic Italian voice with expressive intonation"),
    (&["pt"], "Rich Portuguese voice with smooth delivery"),
    (&["ja"], "Authentic Japanese voice with proper pitch accent"),
    (&["ko"], "Natural Korean voice with correct honorific pronunciation"),
    (&["zh"], "Clear Chinese voice with accurate tonal pronunciation"),
    (&["ar"], "Fluent Arabic voice with proper classical pronunciation"),
    (&["hi"], "Native Hindi voice with authentic accent and rhythm"),
    (&["ru"], "Rich Russian voice with proper stress patterns"),
];

/// A human readable description of a voice.
///
/// Rules are evaluated in a fixed order and the first match wins:
/// 1. quality tier keywords in the name (`neural`/`premium`, then
///    `wavenet`/`studio`)
/// 2. feminine, then masculine name keywords
/// 3. the locale, by language prefix (or full tag for regional English)
/// 4. [`GENERIC_DESCRIPTION`]
///
/// Name keywords are case-insensitive substrings, so the result depends
/// only on the voice's name and locale.
///
/// ## Examples
///
/// ```
/// use read_aloud::Voice;
/// use read_aloud::locale::describe_voice;
///
/// let voice = Voice::new("Google UK English Female", "en-GB");
/// assert!(describe_voice(&voice).contains("feminine"));
/// ```
pub fn describe_voice(voice: &Voice) -> &'static str {
    let name = voice.name.to_lowercase();
    let name_has = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));

    if name_has(&["neural", "premium"]) {
        return "High-quality neural voice with natural intonation and expression";
    }
    if name_has(&["wavenet", "studio"]) {
        return "Studio-quality voice with advanced AI processing";
    }
    if name_has(FEMININE_KEYWORDS) {
        return "Clear, professional feminine voice perfect for narration and presentations";
    }
    if name_has(MASCULINE_KEYWORDS) {
        return "Authoritative masculine voice ideal for professional content";
    }

    let tag = normalize_locale(&voice.lang).to_ascii_lowercase();
    let prefix = language_prefix(&voice.lang);
    LOCALE_DESCRIPTIONS
        .iter()
        .find(|(rules, _)| rules.iter().any(|rule| locale_matches(&tag, &prefix, rule)))
        .map(|(_, description)| *description)
        .unwrap_or(GENERIC_DESCRIPTION)
}

fn locale_matches(tag: &str, prefix: &str, rule: &str) -> bool {
    if rule.contains('-') {
        tag.strip_prefix(rule)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
    } else {
        prefix == rule
    }
}

// ============================================================================
// Display Names
// ============================================================================

/// The voice name without a leading `Microsoft` or `Google` vendor prefix.
///
/// ## Examples
///
/// ```
/// use read_aloud::Voice;
/// use read_aloud::locale::display_name;
///
/// let voice = Voice::new("Microsoft Aria Online (Natural) - English (United States)", "en-US");
/// assert_eq!(display_name(&voice), "Aria Online (Natural) - English (United States)");
/// ```
pub fn display_name(voice: &Voice) -> &str {
    let name = strip_vendor(&voice.name, "Microsoft");
    strip_vendor(name, "Google")
}

/// [`display_name`] cut at the first `" -"`, for compact labels.
pub fn short_display_name(voice: &Voice) -> &str {
    let name = display_name(voice);
    name.split(" -").next().unwrap_or(name)
}

fn strip_vendor<'a>(name: &'a str, vendor: &str) -> &'a str {
    match name.strip_prefix(vendor) {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => name,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Locale tags
    // ========================================================================

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("en-gb"), "en-GB");
        assert_eq!(normalize_locale("EN_us"), "en-US");
        assert_eq!(normalize_locale("fr"), "fr");
        assert_eq!(normalize_locale("sr-latn-rs"), "sr-Latn-RS");
        assert_eq!(normalize_locale("zh-yue"), "zh-yue");
        assert_eq!(normalize_locale(""), "");
    }

    #[test]
    fn test_language_prefix() {
        assert_eq!(language_prefix("en-US"), "en");
        assert_eq!(language_prefix("pt_BR"), "pt");
        assert_eq!(language_prefix("JA"), "ja");
        assert_eq!(language_prefix(""), "");
    }

    // ========================================================================
    // Flags
    // ========================================================================

    #[test]
    fn test_flag_exact_match() {
        assert_eq!(flag_for("en-US"), "🇺🇸");
        assert_eq!(flag_for("fr-CA"), "🇨🇦");
        assert_eq!(flag_for("ta-IN"), "🇮🇳");
        assert_eq!(flag_for("af-ZA"), "🇿🇦");
    }

    #[test]
    fn test_flag_is_case_and_separator_insensitive() {
        assert_eq!(flag_for("en-gb"), "🇬🇧");
        assert_eq!(flag_for("en_GB"), "🇬🇧");
    }

    #[test]
    fn test_flag_prefix_match() {
        assert_eq!(flag_for("de"), "🇩🇪");
        assert_eq!(flag_for("ja-XX"), "🇯🇵");
        assert_eq!(flag_for("ru-Latn"), "🇷🇺");
    }

    #[test]
    fn test_flag_ambiguous_prefix_falls_back_to_globe() {
        assert_eq!(flag_for("en"), GLOBE);
        assert_eq!(flag_for("es-419"), GLOBE);
    }

    #[test]
    fn test_flag_never_empty() {
        for tag in ["", "-", "xx", "xx-YY", "??", "en-ZZ", "cmn-latn-pinyin"] {
            assert!(!flag_for(tag).is_empty(), "empty flag for {tag:?}");
        }
    }

    // ========================================================================
    // Preview sentences
    // ========================================================================

    #[test]
    fn test_preview_text_by_language() {
        assert!(preview_text_for("es-MX").starts_with("Hola"));
        assert!(preview_text_for("de-AT").starts_with("Hallo, das"));
        assert!(preview_text_for("nl").starts_with("Hallo, dit"));
        assert!(preview_text_for("ko-KR").starts_with("안녕하세요"));
    }

    #[test]
    fn test_preview_text_defaults_to_english() {
        assert_eq!(preview_text_for("en-AU"), ENGLISH_PREVIEW);
        assert_eq!(preview_text_for("pl-PL"), ENGLISH_PREVIEW);
        assert_eq!(preview_text_for(""), ENGLISH_PREVIEW);
    }

    // ========================================================================
    // Descriptions
    // ========================================================================

    fn describe(name: &str, lang: &str) -> &'static str {
        describe_voice(&Voice::new(name, lang))
    }

    #[test]
    fn test_describe_quality_tiers_win_first() {
        assert!(describe("Jenny Neural", "en-US").starts_with("High-quality neural"));
        assert!(describe("Karen (Premium)", "en-AU").starts_with("High-quality neural"));
        assert!(describe("en-US-Wavenet-F", "en-US").starts_with("Studio-quality"));
        assert!(describe("Studio-O", "en-US").starts_with("Studio-quality"));
    }

    #[test]
    fn test_describe_feminine_before_masculine() {
        // "female" contains "male"; the feminine rule is checked first
        assert!(describe("Google UK English Female", "en-GB").contains("feminine"));
        assert!(describe("Hazel", "en-GB").contains("feminine"));
    }

    #[test]
    fn test_describe_masculine_names() {
        assert!(describe("Daniel", "en-GB").contains("masculine"));
        assert!(describe("Google UK English Male", "en-GB").contains("masculine"));
        // substring match: "german" contains "man"
        assert!(describe("German", "de").contains("masculine"));
    }

    #[test]
    fn test_describe_by_locale() {
        assert!(describe("Karen", "en-AU").starts_with("Sophisticated English"));
        assert!(describe("Allison", "en-US").starts_with("Standard American"));
        // substring match: "samantha" contains "man"
        assert!(describe("Samantha", "en-US").contains("masculine"));
        assert!(describe("Thomas", "fr-FR").starts_with("Elegant French"));
        assert!(describe("Kyoko", "ja-JP").starts_with("Authentic Japanese"));
        assert!(describe("Milena", "ru-RU").starts_with("Rich Russian"));
    }

    #[test]
    fn test_describe_matches_language_prefix_not_substring() {
        assert_eq!(describe("Montserrat", "ca-ES"), GENERIC_DESCRIPTION);
        assert_eq!(describe("Miren", "eu-ES"), GENERIC_DESCRIPTION);
        assert_eq!(describe("Carmela", "gl-ES"), GENERIC_DESCRIPTION);
        assert!(describe("Monica", "es-ES").starts_with("Warm Spanish"));
        assert!(describe("Luciana", "pt-BR").starts_with("Rich Portuguese"));
    }

    #[test]
    fn test_describe_normalizes_locale() {
        assert!(describe("Karen", "en_au").starts_with("Sophisticated English"));
        assert!(describe("Allison", "EN-us").starts_with("Standard American"));
        assert!(describe("Amelie", "FR_ca").starts_with("Elegant French"));
        assert_eq!(describe("Tessa", "en-ZA"), GENERIC_DESCRIPTION);
    }

    #[test]
    fn test_describe_generic_fallback() {
        assert_eq!(describe("Zosia", "pl-PL"), GENERIC_DESCRIPTION);
        assert_eq!(describe("", ""), GENERIC_DESCRIPTION);
    }

    #[test]
    fn test_describe_is_deterministic() {
        let voice = Voice::new("Moira", "en-IE");
        assert_eq!(describe_voice(&voice), describe_voice(&voice.clone()));
    }

    // ========================================================================
    // Display names
    // ========================================================================

    #[test]
    fn test_display_name_strips_vendor_prefix() {
        assert_eq!(display_name(&Voice::new("Google español", "es-ES")), "español");
        assert_eq!(display_name(&Voice::new("Microsoft  David", "en-US")), "David");
        assert_eq!(display_name(&Voice::new("Samantha", "en-US")), "Samantha");
    }

    #[test]
    fn test_display_name_requires_whitespace_after_vendor() {
        assert_eq!(display_name(&Voice::new("Googler", "en-US")), "Googler");
    }

    #[test]
    fn test_short_display_name() {
        let voice = Voice::new("Microsoft Libby Online (Natural) - English (United Kingdom)", "en-GB");
        assert_eq!(short_display_name(&voice), "Libby Online (Natural)");
        assert_eq!(short_display_name(&Voice::new("Alex", "en-US")), "Alex");
    }
}
