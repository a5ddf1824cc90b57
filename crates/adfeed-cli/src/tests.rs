use super::*;

#[test]
fn parses_fetch_command() {
    let cli = Cli::try_parse_from(["adfeed", "fetch"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Fetch {
            window_hours: None,
            pretty: false
        }
    ));
}

#[test]
fn parses_fetch_with_window_override() {
    let cli = Cli::try_parse_from(["adfeed", "fetch", "--window-hours", "2160", "--pretty"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Fetch {
            window_hours: Some(2160),
            pretty: true
        }
    ));
}

#[test]
fn rejects_zero_window() {
    let result = Cli::try_parse_from(["adfeed", "fetch", "--window-hours", "0"]);
    assert!(result.is_err());
}

#[test]
fn parses_normalize_command() {
    let cli = Cli::try_parse_from(["adfeed", "normalize", "--input", "ads.json"])
        .expect("expected valid cli args");

    match cli.command {
        Commands::Normalize { input, pretty } => {
            assert_eq!(input, PathBuf::from("ads.json"));
            assert!(!pretty);
        }
        other @ Commands::Fetch { .. } => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn normalize_requires_input() {
    let result = Cli::try_parse_from(["adfeed", "normalize"]);
    assert!(result.is_err());
}

#[test]
fn subcommand_is_required() {
    let result = Cli::try_parse_from(["adfeed"]);
    assert!(result.is_err());
}
