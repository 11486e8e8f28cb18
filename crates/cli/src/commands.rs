//! Command handlers. Each returns the text to print on stdout.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Serialize;

use storefront_catalog::{FilterCodec, InMemoryCatalog, Pagination, browse};
use storefront_core::ProductId;
use storefront_products::{Bundle, BundlePricing, Product};
use storefront_session::{NotificationSink, SessionConfig, open_file_session};

use crate::cli::{BundleArgs, Cli, Command, CompareCommand, RecentCommand};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonOutput<'a> {
    products: &'a [Product],
    panel_open: bool,
    outcome: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BundleOutput<'a> {
    name: &'a str,
    product_ids: Vec<&'a str>,
    discount_percentage: f64,
    #[serde(flatten)]
    pricing: BundlePricing,
}

pub fn run(cli: Cli, sink: Arc<dyn NotificationSink>) -> anyhow::Result<String> {
    let mut config = SessionConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let catalog_path = cli.catalog.as_deref();

    match cli.command {
        Command::Browse(args) => {
            let catalog = load_catalog(catalog_path)?;
            let page = match (args.limit, args.offset) {
                (None, None) => None,
                (limit, offset) => Some(Pagination::new(limit, offset)),
            };
            let view = browse(&catalog, &args.query, page)?;
            to_json(&view)
        }
        Command::Decode { query } => to_json(&FilterCodec::decode(&query)),
        Command::View { id } => {
            let catalog = load_catalog(catalog_path)?;
            let product = find_product(&catalog, &id)?;
            let mut session = open_file_session(&config, sink)?;
            session.record_view(product);
            to_json(session.recently_viewed().items())
        }
        Command::Recent(cmd) => {
            let mut session = open_file_session(&config, sink)?;
            let recent = session.recently_viewed_mut();
            match cmd {
                RecentCommand::List => {}
                RecentCommand::Remove { id } => recent.remove(&ProductId::new(id)),
                RecentCommand::Clear => recent.clear(),
                RecentCommand::Capacity { capacity } => recent.set_capacity(capacity),
            }
            to_json(session.recently_viewed().items())
        }
        Command::Compare(cmd) => {
            let mut session = open_file_session(&config, sink)?;
            let outcome = match cmd {
                CompareCommand::List => None,
                CompareCommand::Add { id } => {
                    let catalog = load_catalog(catalog_path)?;
                    let product = find_product(&catalog, &id)?.clone();
                    Some(session.comparison_mut().add(product).as_str())
                }
                CompareCommand::Remove { id } => {
                    session.comparison_mut().remove(&ProductId::new(id));
                    None
                }
                CompareCommand::Clear => {
                    session.comparison_mut().clear();
                    None
                }
            };
            let comparison = session.comparison();
            to_json(&ComparisonOutput {
                products: comparison.items(),
                panel_open: comparison.is_panel_open(),
                outcome,
            })
        }
        Command::Bundle(args) => {
            let catalog = load_catalog(catalog_path)?;
            price_bundle(&catalog, &args)
        }
    }
}

fn price_bundle(catalog: &InMemoryCatalog, args: &BundleArgs) -> anyhow::Result<String> {
    let products = args
        .ids
        .iter()
        .map(|id| find_product(catalog, id).cloned())
        .collect::<anyhow::Result<Vec<_>>>()?;

    let bundle = if args.unchecked {
        Bundle::new(args.name.clone(), products, args.discount)
    } else {
        Bundle::try_new(args.name.clone(), products, args.discount)?
    };

    to_json(&BundleOutput {
        name: &bundle.name,
        product_ids: bundle.products.iter().map(|p| p.id.as_str()).collect(),
        discount_percentage: bundle.discount_percentage,
        pricing: bundle.pricing(),
    })
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<InMemoryCatalog> {
    let Some(path) = path else {
        bail!("this command needs a catalog: pass --catalog or set STOREFRONT_CATALOG");
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog at {}", path.display()))?;
    let catalog = InMemoryCatalog::from_json(&raw)
        .with_context(|| format!("failed to load catalog at {}", path.display()))?;
    tracing::debug!(products = catalog.products().len(), "catalog loaded");
    Ok(catalog)
}

fn find_product<'a>(catalog: &'a InMemoryCatalog, id: &str) -> anyhow::Result<&'a Product> {
    catalog
        .get(id.trim())
        .with_context(|| format!("no product with id {id} in catalog"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to render output")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use storefront_session::RecordingSink;

    use super::*;

    const CATALOG: &str = r#"[
        {"id": 1, "name": "Notebook", "price": 19.99, "category": "stationery", "rating": 4.0, "stock": 5},
        {"id": 2, "name": "Pen Set", "price": 22.99, "category": "stationery", "rating": 4.6, "stock": 0},
        {"id": 3, "name": "Desk Mat", "price": 30.0, "category": "desk", "rating": 3.5, "stock": 2}
    ]"#;

    struct Fixture {
        _dir: tempfile::TempDir,
        catalog: PathBuf,
        data: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.json");
        std::fs::write(&catalog, CATALOG).unwrap();
        let data = dir.path().join("session");
        Fixture {
            _dir: dir,
            catalog,
            data,
        }
    }

    fn exec(fx: &Fixture, args: &[&str]) -> anyhow::Result<serde_json::Value> {
        let mut argv = vec![
            "storefront".to_string(),
            "--catalog".to_string(),
            fx.catalog.display().to_string(),
            "--data-dir".to_string(),
            fx.data.display().to_string(),
        ];
        argv.extend(args.iter().map(|a| a.to_string()));
        let cli = Cli::try_parse_from(argv)?;
        let out = run(cli, Arc::new(RecordingSink::new()))?;
        Ok(serde_json::from_str(&out)?)
    }

    fn ids(value: &serde_json::Value) -> Vec<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn browse_filters_and_sorts() {
        let fx = fixture();
        let view = exec(&fx, &["browse", "?category=stationery&sortBy=priceDesc"]).unwrap();
        assert_eq!(ids(&view["products"]), vec!["2", "1"]);
        assert_eq!(view["isSearching"], false);
    }

    #[test]
    fn views_persist_between_runs() {
        let fx = fixture();
        exec(&fx, &["view", "1"]).unwrap();
        exec(&fx, &["view", "3"]).unwrap();
        let recent = exec(&fx, &["view", "1"]).unwrap();
        assert_eq!(ids(&recent), vec!["1", "3"]);

        let recent = exec(&fx, &["recent", "list"]).unwrap();
        assert_eq!(ids(&recent), vec!["1", "3"]);

        let recent = exec(&fx, &["recent", "capacity", "1"]).unwrap();
        assert_eq!(ids(&recent), vec!["1"]);
    }

    #[test]
    fn compare_reports_outcomes() {
        let fx = fixture();
        let added = exec(&fx, &["compare", "add", "2"]).unwrap();
        assert_eq!(added["outcome"], "added");
        assert_eq!(added["panelOpen"], true);

        let dup = exec(&fx, &["compare", "add", "2"]).unwrap();
        assert_eq!(dup["outcome"], "duplicate");
        assert_eq!(ids(&dup["products"]), vec!["2"]);
    }

    #[test]
    fn bundle_pricing_output() {
        let fx = fixture();
        let out = exec(&fx, &["bundle", "--ids", "1,2", "--discount", "15", "--unchecked"]).unwrap();
        assert!((out["original"].as_f64().unwrap() - 42.98).abs() < 1e-9);
        assert!((out["discounted"].as_f64().unwrap() - 36.533).abs() < 1e-9);

        let err = exec(&fx, &["bundle", "--ids", "1,2", "--discount", "15"]).unwrap_err();
        assert!(err.to_string().contains("at least"));
    }

    #[test]
    fn unknown_product_is_an_error() {
        let fx = fixture();
        let err = exec(&fx, &["view", "99"]).unwrap_err();
        assert!(err.to_string().contains("no product with id 99"));
    }
}
