use clap::{Arg, ArgAction, Command, value_parser};
use clap_complete::Shell;

pub fn build_cli() -> Command {
    Command::new("mixo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate and manage AI cocktail recipes")
        .long_about("Mixo asks the recipe service to invent a cocktail from a free-text description, then lets you browse, favorite and delete the recipes it has created for you.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("server")
                .long("server")
                .short('s')
                .help("Base URL of the recipe service (overrides config and MIXO_API_URL)")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Generate a new cocktail from a description")
                .arg(
                    Arg::new("request")
                        .help("What you feel like drinking (10 to 500 characters)")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("simple")
                        .long("simple")
                        .help("Skip the image prompt and music suggestions")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("list")
                .about("List your cocktails")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Only show cocktails whose name, description or ingredients contain this text")
                )
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .short('f')
                        .help("Which cocktails to show")
                        .value_parser(["all", "favorites", "recent"])
                        .default_value("all")
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("Page number")
                        .value_parser(value_parser!(u32).range(1..))
                        .default_value("1")
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("show")
                .about("Show one cocktail in full")
                .arg(
                    Arg::new("id")
                        .help("Cocktail id")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .index(1)
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("favorite")
                .about("Toggle the favorite flag of a cocktail")
                .arg(
                    Arg::new("id")
                        .help("Cocktail id")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .index(1)
                )
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a cocktail")
                .arg(
                    Arg::new("id")
                        .help("Cocktail id")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .index(1)
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .short('F')
                        .help("Delete without asking for confirmation")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .value_parser(value_parser!(Shell))
                        .index(1)
                )
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "mixo");
    }

    #[test]
    fn test_cli_generate_command() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mixo", "generate", "Un cocktail fruité sans alcool"])
            .unwrap();

        let sub_matches = matches.subcommand_matches("generate").unwrap();
        assert_eq!(
            sub_matches.get_one::<String>("request").unwrap(),
            "Un cocktail fruité sans alcool"
        );
        assert!(!sub_matches.get_flag("simple"));
    }

    #[test]
    fn test_cli_list_defaults() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mixo", "list"])
            .unwrap();

        let sub_matches = matches.subcommand_matches("list").unwrap();
        assert_eq!(sub_matches.get_one::<String>("filter").unwrap(), "all");
        assert_eq!(*sub_matches.get_one::<u32>("page").unwrap(), 1);
        assert!(sub_matches.get_one::<String>("search").is_none());
        assert!(!sub_matches.get_flag("json"));
    }

    #[test]
    fn test_cli_list_rejects_unknown_filter() {
        let result = build_cli().try_get_matches_from(vec!["mixo", "list", "--filter", "popular"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_list_rejects_page_zero() {
        let result = build_cli().try_get_matches_from(vec!["mixo", "list", "--page", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_show_requires_numeric_id() {
        let result = build_cli().try_get_matches_from(vec!["mixo", "show", "mojito"]);
        assert!(result.is_err());

        let matches = build_cli()
            .try_get_matches_from(vec!["mixo", "show", "42"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("show").unwrap();
        assert_eq!(*sub_matches.get_one::<i64>("id").unwrap(), 42);
    }

    #[test]
    fn test_cli_delete_force_flag() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mixo", "delete", "7", "--force"])
            .unwrap();

        let sub_matches = matches.subcommand_matches("delete").unwrap();
        assert!(sub_matches.get_flag("force"));
    }

    #[test]
    fn test_cli_server_flag_is_global() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mixo", "favorite", "3", "--server", "http://localhost:9000"])
            .unwrap();

        let sub_matches = matches.subcommand_matches("favorite").unwrap();
        assert_eq!(
            sub_matches.get_one::<String>("server").unwrap(),
            "http://localhost:9000"
        );
    }

    #[test]
    fn test_cli_verbose_flag_default_false() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mixo", "list"])
            .unwrap();
        assert!(!matches.get_flag("verbose"));
    }

    #[test]
    fn test_cli_verbose_flag_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mixo", "list", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_cli_completions_shell() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mixo", "completions", "bash"])
            .unwrap();

        let sub_matches = matches.subcommand_matches("completions").unwrap();
        assert_eq!(*sub_matches.get_one::<Shell>("shell").unwrap(), Shell::Bash);
    }
}
