//! Usage text

use crate::{args::Command, config::Settings, errors::AppError};

/// Usage text for a tool invoked as `tool`
pub fn usage(tool: &str) -> String {
    format!(
        "\
{tool} <lang>                  Update all ServiceStack References in directory (recursive)
{tool} <file>                  Update existing ServiceStack Reference (e.g. dtos.cs)
{tool} <lang>     <url> <file> Add ServiceStack Reference and save to file name
{tool} csharp     <url>        Add C# ServiceStack Reference            (Alias 'cs')
{tool} typescript <url>        Add TypeScript ServiceStack Reference    (Alias 'ts')
{tool} javascript <url>        Add JavaScript ServiceStack Reference    (Alias 'js')
{tool} python     <url>        Add Python ServiceStack Reference        (Alias 'py')
{tool} swift      <url>        Add Swift ServiceStack Reference         (Alias 'sw')
{tool} java       <url>        Add Java ServiceStack Reference          (Alias 'ja')
{tool} kotlin     <url>        Add Kotlin ServiceStack Reference        (Alias 'kt')
{tool} dart       <url>        Add Dart ServiceStack Reference          (Alias 'da')
{tool} php        <url>        Add PHP ServiceStack Reference
{tool} go         <url>        Add Go ServiceStack Reference
{tool} rust       <url>        Add Rust ServiceStack Reference          (Alias 'rs')
{tool} ruby       <url>        Add Ruby ServiceStack Reference          (Alias 'rb')
{tool} zig        <url>        Add Zig ServiceStack Reference
{tool} fsharp     <url>        Add F# ServiceStack Reference            (Alias 'fs')
{tool} vbnet      <url>        Add VB.NET ServiceStack Reference        (Alias 'vb')
{tool} tsd        <url>        Add TypeScript Definition ServiceStack Reference

Options:
    -h, --help, -?            Print this message
    -v, --version             Print tool version
        --include <tag>       Include all APIs in specified tag group
    -q, --qs, --query <key=value>
                              Add query string to Add ServiceStack Reference URL
        --verbose             Display verbose logging
        --ignore-ssl-errors   Ignore SSL Errors
        --json                Print the parsed command as JSON"
    )
}

const TELEMETRY_NOTICE: &str = "\
This tool collects anonymous usage to determine the most used languages to improve your experience.
To disable set SERVICESTACK_TELEMETRY_OPTOUT=1 environment variable using your favorite shell.";

/// Print usage, preceded by an "Unknown Command" line if any argument was
/// not recognized
///
/// # Errors
///
/// Returns [`AppError::UnrecognizedArgument`] after printing when `command`
/// has unrecognized arguments.
pub fn print_help(command: &Command, settings: &Settings) -> Result<(), AppError> {
    let unknown = (!command.unrecognized.is_empty()).then(|| AppError::UnrecognizedArgument {
        tool: settings.tool_name.clone(),
        args: command.unrecognized.join(" "),
    });

    if let Some(err) = &unknown {
        println!("{}\n", err);
    }

    println!("{}", usage(&settings.tool_name));

    if settings.telemetry_optout.is_none() {
        println!("\n{}", TELEMETRY_NOTICE);
    }

    match unknown {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::LANGUAGES;

    #[test]
    fn test_usage_starts_with_tool_name() {
        assert!(usage("get-dtos").starts_with("get-dtos <lang>"));
        assert!(usage("x-dtos").starts_with("x-dtos <lang>"));
    }

    #[test]
    fn test_usage_lists_every_language() {
        let text = usage("get-dtos");
        for lang in LANGUAGES.iter().filter(|lang| lang.id != "typescript.d") {
            assert!(text.contains(&format!("get-dtos {:<10} <url>", lang.id)), "{}", lang.id);
        }
        assert!(text.contains("get-dtos tsd"));
    }

    #[test]
    fn test_usage_lists_every_query_switch() {
        let text = usage("get-dtos");
        assert!(text.contains("-q, --qs, --query <key=value>"));
    }
}
