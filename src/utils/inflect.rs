//! Naming utilities: class base names and English pluralization.

use regex::Regex;
use std::sync::LazyLock;

/// Words whose plural cannot be derived from suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("atlas", "atlases"),
    ("beef", "beefs"),
    ("brother", "brothers"),
    ("cafe", "cafes"),
    ("child", "children"),
    ("cookie", "cookies"),
    ("corpus", "corpuses"),
    ("cow", "cows"),
    ("curve", "curves"),
    ("foe", "foes"),
    ("genie", "genies"),
    ("genus", "genera"),
    ("graffito", "graffiti"),
    ("hoof", "hoofs"),
    ("loaf", "loaves"),
    ("man", "men"),
    ("money", "monies"),
    ("mongoose", "mongooses"),
    ("move", "moves"),
    ("mythos", "mythoi"),
    ("niche", "niches"),
    ("octopus", "octopuses"),
    ("opus", "opuses"),
    ("ox", "oxen"),
    ("sex", "sexes"),
    ("soliloquy", "soliloquies"),
    ("testis", "testes"),
    ("trilby", "trilbys"),
    ("turf", "turfs"),
    ("wave", "waves"),
];

/// Suffix rules, first match wins. The last rule appends `s`.
static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)([nrlm]ese|deer|fish|sheep|measles|ois|pox|media)$", "${1}"),
        (r"(?i)^(sea[- ]bass)$", "${1}"),
        (r"(?i)(m)ove$", "${1}oves"),
        (r"(?i)(f)oot$", "${1}eet"),
        (r"(?i)(h)uman$", "${1}umans"),
        (r"(?i)(s)tatus$", "${1}tatuses"),
        (r"(?i)(s)taff$", "${1}taff"),
        (r"(?i)(t)ooth$", "${1}eeth"),
        (r"(?i)(quiz)$", "${1}zes"),
        (r"(?i)^(ox)$", "${1}en"),
        (r"(?i)([ml])ouse$", "${1}ice"),
        (r"(?i)(matr|vert|ind)(ix|ex)$", "${1}ices"),
        (r"(?i)(x|ch|ss|sh)$", "${1}es"),
        (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
        (r"(?i)(hive)$", "${1}s"),
        (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(?i)sis$", "ses"),
        (r"(?i)([ti])um$", "${1}a"),
        (r"(?i)(p)erson$", "${1}eople"),
        (r"(?i)(m)an$", "${1}en"),
        (r"(?i)(c)hild$", "${1}hildren"),
        (r"(?i)(buffal|tomat|potat|ech|her|vet)o$", "${1}oes"),
        (
            r"(?i)(alumn|bacill|cact|foc|fung|nucle|radi|stimul|syllab|termin|vir)us$",
            "${1}i",
        ),
        (r"(?i)us$", "uses"),
        (r"(?i)(alias)$", "${1}es"),
        (r"(?i)(ax|cris|test)is$", "${1}es"),
        (r"(?i)(s)$", "${1}"),
        (r"$", "s"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid plural rule"), replacement))
    .collect()
});

/// Final identifier component of a qualified type name.
///
/// Generic arguments are ignored; `::`, `\`, `/` and `.` all count as
/// qualifiers.
///
/// # Examples
///
/// - `base_name("app::models::User")` -> `"User"`
/// - `base_name("app\\models\\User")` -> `"User"`
/// - `base_name("app::Page<app::User>")` -> `"Page"`
pub fn base_name(qualified: &str) -> &str {
    let name = qualified.split('<').next().unwrap_or(qualified);
    name.rsplit([':', '\\', '/', '.']).next().unwrap_or(name)
}

/// Pluralize an English word, keeping the case of its first letter.
///
/// # Examples
///
/// - `pluralize("User")` -> `"Users"`
/// - `pluralize("Category")` -> `"Categories"`
/// - `pluralize("Person")` -> `"People"`
/// - `pluralize("Sheep")` -> `"Sheep"`
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        let first = word.chars().next().map_or(0, char::len_utf8);
        let rest = plural.get(first..).unwrap_or_default();
        return format!("{}{}", &word[..first], rest);
    }

    for (rule, replacement) in RULES.iter() {
        if rule.is_match(word) {
            return rule.replace(word, *replacement).into_owned();
        }
    }
    word.to_string()
}
