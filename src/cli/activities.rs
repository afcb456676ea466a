use std::path::Path;

use tabled::Table;

use crate::{
    Res, info,
    taste::{ActivityCatalog, ActivityCategory},
    types::ActivityTableRow,
    warning,
};

/// The catalog at `path`, or the built-in tables when no path is given.
pub async fn load_catalog(path: Option<&Path>) -> Res<ActivityCatalog> {
    match path {
        Some(path) => {
            let catalog = ActivityCatalog::load(path).await?;
            info!("Loaded activity catalog from {}", path.display());
            Ok(catalog)
        }
        None => Ok(ActivityCatalog::standard()),
    }
}

pub async fn activities(path: Option<&Path>) {
    let catalog = match load_catalog(path).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warning!("Failed to load activity catalog. Err: {}", e);
            return;
        }
    };

    let rows: Vec<ActivityTableRow> = ActivityCategory::ALL
        .into_iter()
        .filter_map(|activity| {
            let profile = catalog.profile(activity).ok()?;
            let formula = match &profile.formula {
                Some(rules) => rules
                    .iter()
                    .map(|r| r.param_name())
                    .collect::<Vec<_>>()
                    .join(" "),
                None => "-".to_string(),
            };
            Some(ActivityTableRow {
                activity: activity.to_string(),
                search: activity.search_term().to_string(),
                keywords: profile.keywords.join(", "),
                formula,
            })
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}
