use super::*;
use storefront_core::{Facet, FetchRequest};

fn browse_args(argv: &[&str]) -> BrowseArgs {
    let cli = Cli::try_parse_from(argv).expect("should parse browse");
    match cli.command {
        Commands::Browse(args) => args,
        Commands::Config => panic!("expected browse, got config"),
    }
}

#[test]
fn parse_browse_defaults() {
    let args = browse_args(&["storefront", "browse"]);
    assert!(args.categories.is_empty());
    assert!(args.brands.is_empty());
    assert_eq!(args.sort, SortKey::PriceAsc);
    assert_eq!(args.page, 1);
    assert_eq!(args.page_size, None);
    assert!(!args.json);
}

#[test]
fn parse_browse_repeated_filters_and_sort() {
    let args = browse_args(&[
        "storefront",
        "browse",
        "--category",
        "men",
        "--category",
        "kids",
        "--brand",
        "nike",
        "--sort",
        "title-desc",
        "--page",
        "3",
        "--json",
    ]);
    assert_eq!(args.categories, vec!["men", "kids"]);
    assert_eq!(args.brands, vec!["nike"]);
    assert_eq!(args.sort, SortKey::TitleDesc);
    assert_eq!(args.page, 3);
    assert!(args.json);
}

#[test]
fn parse_browse_rejects_unknown_sort() {
    let result = Cli::try_parse_from(["storefront", "browse", "--sort", "popularity"]);
    assert!(result.is_err(), "unknown sort key should fail to parse");
}

#[test]
fn parse_config() {
    let cli = Cli::try_parse_from(["storefront", "config"]).expect("should parse config");
    assert!(matches!(cli.command, Commands::Config));
}

#[test]
fn parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["storefront"]).is_err());
}

#[test]
fn browse_args_build_request() {
    let args = browse_args(&[
        "storefront",
        "browse",
        "--brand",
        "levi",
        "--brand",
        "h&m",
        "--sort",
        "price-desc",
        "--page",
        "2",
    ]);

    let request = args.to_request(20);

    assert_eq!(
        request,
        FetchRequest::new()
            .with_filter(Facet::Brand, ["h&m", "levi"])
            .with_sort(SortKey::PriceDesc)
            .with_page(2)
            .with_page_size(20)
    );
    assert!(request.selected(Facet::Category).is_none());
}

#[test]
fn page_size_flag_overrides_configured_default() {
    let args = browse_args(&["storefront", "browse", "--page-size", "5"]);
    assert_eq!(args.to_request(20).page_size(), 5);
}
