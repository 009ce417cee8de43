//! Page names and output file names.

use std::path::PathBuf;

use ecow::EcoString;
use indexmap::IndexMap;

/// Removes hyphens and underscores and capitalizes each word between them.
///
/// Every word keeps only its first letter upper case, so an already
/// camel-cased name is flattened: `ThisIsSome` becomes `Thisissome`.
pub fn snake2camel(snaked: &str) -> String {
    snaked.split(['-', '_']).map(capitalize).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Wiki page name a document is published under.
pub fn target_uri(docname: &str) -> String {
    snake2camel(docname)
}

/// File a document is written to, relative to the output directory.
pub fn page_file_name(docname: &str, overrides: &IndexMap<EcoString, EcoString>) -> PathBuf {
    match overrides.get(docname) {
        Some(name) => PathBuf::from(name.as_str()),
        None => PathBuf::from(format!("{}.xwiki", target_uri(docname))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_and_kebab_case_become_camel_case() {
        let cases = [
            ("this-is-some-snake-cased-stuff", "ThisIsSomeSnakeCasedStuff"),
            ("this_is_some_snake_cased_stuff", "ThisIsSomeSnakeCasedStuff"),
            ("this-is_some-snake_cased-stuff", "ThisIsSomeSnakeCasedStuff"),
            ("This-Is_Some-Snake_Cased-Stuff", "ThisIsSomeSnakeCasedStuff"),
            ("ThisIsSomeSnakeCasedStuff", "Thisissomesnakecasedstuff"),
        ];

        for (input, expected) in cases {
            assert_eq!(snake2camel(input), expected, "input: {input}");
        }
    }

    #[test]
    fn empty_words_vanish() {
        assert_eq!(snake2camel("a--b__c"), "ABC");
        assert_eq!(snake2camel(""), "");
    }

    #[test]
    fn overrides_win_over_derived_names() {
        let mut overrides = IndexMap::new();
        overrides.insert(EcoString::from("index"), EcoString::from("Main.xwiki"));

        assert_eq!(page_file_name("index", &overrides), PathBuf::from("Main.xwiki"));
        assert_eq!(
            page_file_name("getting_started", &overrides),
            PathBuf::from("GettingStarted.xwiki")
        );
        assert_eq!(
            page_file_name("release-1.2", &overrides),
            PathBuf::from("Release1.2.xwiki")
        );
    }
}
