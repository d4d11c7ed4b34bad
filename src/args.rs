//! Argument classification
//!
//! Arguments are classified left to right and earlier tokens change how later
//! ones are read: a URL only defaults the output file when a language came
//! before it, and a file name only turns the command into an add when a URL
//! came before it. A declarative parser can't express that, so this is a plain
//! index loop.

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::{ffi::OsString, sync::LazyLock};

use crate::{
    languages,
    utils::{is_local_url, parse_query_string},
};

static LEADING_DASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^-+").expect("valid switch pattern"));

/// What an invocation asks for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    #[default]
    Help,
    Version,
    Add,
    Update,
}

/// The classified intent of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    /// Canonical language identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub query_params: IndexMap<String, String>,
    #[serde(skip_serializing_if = "is_false")]
    pub verbose: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub json_output: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_tls_errors: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// Rewrite `-x`, `--x` and `---x` as `/x`; other tokens are returned as is
pub fn normalize_switch(arg: &str) -> String {
    LEADING_DASHES.replace(arg, "/").into_owned()
}

/// Classify the arguments following the program name
///
/// Never fails: tokens that match nothing are collected in
/// [`Command::unrecognized`].
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Command {
    let mut cmd = Command::default();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_ref();

        if arg.starts_with('-') {
            let switch = normalize_switch(arg);
            match switch.as_str() {
                "/?" | "/h" | "/help" => cmd.kind = CommandKind::Help,
                "/v" | "/version" => cmd.kind = CommandKind::Version,
                "/verbose" => cmd.verbose = true,
                "/ignore-ssl-errors" => cmd.ignore_tls_errors = true,
                "/json" => cmd.json_output = true,
                "/include" | "/q" | "/qs" | "/query" => match args.get(i + 1) {
                    Some(value) => {
                        let value = value.as_ref();
                        if switch == "/include" {
                            cmd.query_params
                                .insert("IncludeTypes".to_string(), value.to_string());
                        } else {
                            cmd.query_params.extend(parse_query_string(value));
                        }
                        i += 1;
                    }
                    None => cmd.unrecognized.push(arg.to_string()),
                },
                _ => cmd.unrecognized.push(arg.to_string()),
            }
        } else if let Some(lang) = languages::from_keyword(arg) {
            cmd.language = Some(lang.id);
            cmd.kind = CommandKind::Update;
        } else if arg.contains("://") {
            let url = match arg.split_once('?') {
                Some((url, qs)) => {
                    cmd.query_params.extend(parse_query_string(qs));
                    url
                }
                None => arg,
            };
            cmd.source_url = Some(url.to_string());
            cmd.kind = CommandKind::Add;
            if is_local_url(arg) {
                cmd.ignore_tls_errors = true;
            }
            if let Some(lang) = cmd.language.and_then(languages::find) {
                cmd.output_path = Some(lang.default_file.to_string());
            }
        } else if let Some(lang) = languages::from_file_name(arg) {
            cmd.output_path = Some(arg.to_string());
            cmd.kind = if cmd.source_url.is_some() {
                CommandKind::Add
            } else {
                CommandKind::Update
            };
            if cmd.language.is_none() {
                cmd.language = Some(lang.id);
            }
        } else if !arg.is_empty() {
            cmd.unrecognized.push(arg.to_string());
        }

        i += 1;
    }

    cmd
}

/// Classify raw process arguments
///
/// Tokens that are not valid UTF-8 can't name a language, URL or file, so
/// they are left out of classification and reported as unrecognized.
pub fn parse_os_args<I: IntoIterator<Item = OsString>>(args: I) -> Command {
    let mut invalid = Vec::new();
    let args: Vec<String> = args
        .into_iter()
        .filter_map(|arg| match arg.into_string() {
            Ok(arg) => Some(arg),
            Err(arg) => {
                invalid.push(arg.to_string_lossy().into_owned());
                None
            }
        })
        .collect();

    let mut cmd = parse_args(&args);
    cmd.unrecognized.extend(invalid);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::LANGUAGES;
    use pretty_assertions::assert_eq;

    const URL: &str = "https://openai.servicestack.net";

    fn include_openai() -> IndexMap<String, String> {
        IndexMap::from([("IncludeTypes".to_string(), "openai".to_string())])
    }

    #[test]
    fn test_no_args_returns_help() {
        let empty: [&str; 0] = [];
        assert_eq!(parse_args(&empty), Command::default());
        assert_eq!(parse_args(&[""]), Command::default());
    }

    #[test]
    fn test_language_keywords_return_update() {
        for lang in LANGUAGES {
            for keyword in std::iter::once(&lang.id).chain(lang.aliases) {
                assert_eq!(
                    parse_args(&[*keyword]),
                    Command {
                        kind: CommandKind::Update,
                        language: Some(lang.id),
                        ..Default::default()
                    },
                    "{keyword}"
                );
            }
        }
    }

    #[test]
    fn test_file_names_return_update() {
        for lang in LANGUAGES {
            assert_eq!(
                parse_args(&[lang.default_file]),
                Command {
                    kind: CommandKind::Update,
                    language: Some(lang.id),
                    output_path: Some(lang.default_file.to_string()),
                    ..Default::default()
                },
                "{}",
                lang.default_file
            );
        }
        assert_eq!(parse_args(&["api/Admin.d.ts"]).language, Some("typescript.d"));
    }

    #[test]
    fn test_language_and_url_return_add() {
        for lang in LANGUAGES {
            assert_eq!(
                parse_args(&[lang.id, URL]),
                Command {
                    kind: CommandKind::Add,
                    language: Some(lang.id),
                    source_url: Some(URL.to_string()),
                    output_path: Some(lang.default_file.to_string()),
                    ..Default::default()
                }
            );
        }
    }

    #[test]
    fn test_include_merges_query_params() {
        let cmd = parse_args(&["csharp", URL, "-include", "openai"]);
        assert_eq!(cmd.kind, CommandKind::Add);
        assert_eq!(cmd.query_params, include_openai());

        let cmd = parse_args(&["typescript", URL, "--include", "openai"]);
        assert_eq!(cmd.language, Some("typescript"));
        assert_eq!(cmd.query_params, include_openai());
    }

    #[test]
    fn test_query_switches() {
        for switch in ["-q", "--qs", "--query"] {
            let cmd = parse_args(&["csharp", URL, switch, "IncludeTypes=openai"]);
            assert_eq!(cmd.query_params, include_openai(), "{switch}");
            assert!(cmd.unrecognized.is_empty());
        }
    }

    #[test]
    fn test_url_query_string_matches_qs_switch() {
        let from_url = parse_args(&["csharp", "https://openai.servicestack.net?IncludeTypes=openai"]);
        let from_switch = parse_args(&["csharp", URL, "--qs", "IncludeTypes=openai"]);
        assert_eq!(from_url.source_url.as_deref(), Some(URL));
        assert_eq!(from_url.query_params, include_openai());
        assert_eq!(from_url, from_switch);
    }

    #[test]
    fn test_url_before_file_name_returns_add() {
        for lang in LANGUAGES {
            assert_eq!(
                parse_args(&[URL, lang.default_file]),
                Command {
                    kind: CommandKind::Add,
                    language: Some(lang.id),
                    source_url: Some(URL.to_string()),
                    output_path: Some(lang.default_file.to_string()),
                    ..Default::default()
                }
            );
        }
    }

    #[test]
    fn test_url_before_language_leaves_output_unset() {
        let cmd = parse_args(&[URL, "csharp"]);
        assert_eq!(cmd.language, Some("csharp"));
        assert_eq!(cmd.output_path, None);
        // the language keyword comes last and wins the kind
        assert_eq!(cmd.kind, CommandKind::Update);
    }

    #[test]
    fn test_explicit_language_is_not_replaced_by_extension() {
        let cmd = parse_args(&["csharp", "dtos.ts"]);
        assert_eq!(cmd.language, Some("csharp"));
        assert_eq!(cmd.output_path.as_deref(), Some("dtos.ts"));
    }

    #[test]
    fn test_local_urls_ignore_tls_errors() {
        assert!(parse_args(&["csharp", "https://localhost:5001"]).ignore_tls_errors);
        assert!(parse_args(&["csharp", "https://127.0.0.1:5001"]).ignore_tls_errors);
        assert!(!parse_args(&["csharp", URL]).ignore_tls_errors);
        assert!(parse_args(&["csharp", URL, "--ignore-ssl-errors"]).ignore_tls_errors);
    }

    #[test]
    fn test_help_and_version_switches() {
        for switch in ["-h", "--help", "-?"] {
            assert_eq!(parse_args(&[switch]).kind, CommandKind::Help, "{switch}");
        }
        for switch in ["-v", "--version", "-version"] {
            assert_eq!(parse_args(&[switch]).kind, CommandKind::Version, "{switch}");
        }
    }

    #[test]
    fn test_flags() {
        let cmd = parse_args(&["--verbose", "--json", "dtos.cs"]);
        assert!(cmd.verbose);
        assert!(cmd.json_output);
        assert_eq!(cmd.kind, CommandKind::Update);
    }

    #[test]
    fn test_unrecognized_tokens_are_collected() {
        let cmd = parse_args(&["unknown", "--frobnicate", "csharp", "--include"]);
        assert_eq!(cmd.unrecognized, vec!["unknown", "--frobnicate", "--include"]);
        assert_eq!(cmd.language, Some("csharp"));
    }

    #[test]
    fn test_os_args_match_string_args() {
        let os_args = ["csharp", URL, "--include", "openai"].map(OsString::from);
        assert_eq!(
            parse_os_args(os_args),
            parse_args(&["csharp", URL, "--include", "openai"])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_args_are_unrecognized() {
        use std::os::unix::ffi::OsStringExt;

        let cmd = parse_os_args(vec![
            OsString::from("csharp"),
            OsString::from_vec(b"dtos\xff.cs".to_vec()),
        ]);
        assert_eq!(cmd.language, Some("csharp"));
        assert_eq!(cmd.output_path, None);
        assert_eq!(cmd.unrecognized, vec!["dtos\u{FFFD}.cs"]);
    }

    #[test]
    fn test_normalize_switch() {
        assert_eq!(normalize_switch("--help"), "/help");
        assert_eq!(normalize_switch("-v"), "/v");
        assert_eq!(normalize_switch("dtos.cs"), "dtos.cs");
    }

    #[test]
    fn test_serializes_set_fields_only() {
        let json = serde_json::to_value(parse_args(&["cs", URL])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "add",
                "language": "csharp",
                "sourceUrl": URL,
                "outputPath": "dtos.cs",
            })
        );
    }
}
