pub mod html;
pub mod pages;

use std::collections::HashMap;

use metrics::{counter, gauge};
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::chiba;
use crate::config::AppConfig;
use crate::db::{horse_repo, owner_repo, race_repo};
use crate::models::{Category, Horse, Owner, Race, ScoringRule};
use crate::scoring;

/// Pre-rendered site. GET handlers only ever read the page store; the
/// database is touched at startup and on revalidation after a submission.
pub struct Site {
    db: PgPool,
    season: String,
    chiba_csv_path: String,
    deploy_hook_url: Option<String>,
    http: reqwest::Client,
    pages: RwLock<HashMap<String, String>>,
}

impl Site {
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        Self {
            db,
            season: config.season.clone(),
            chiba_csv_path: config.chiba_csv_path.clone(),
            deploy_hook_url: config.deploy_hook_url.clone(),
            http: reqwest::Client::new(),
            pages: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a rendered page. `None` means 404.
    pub async fn get_page(&self, path: &str) -> Option<String> {
        let pages = self.pages.read().await;
        pages.get(path).cloned()
    }

    /// Number of rendered pages in the store. Zero means the startup
    /// build has not produced anything.
    pub async fn page_count(&self) -> usize {
        let pages = self.pages.read().await;
        pages.len()
    }

    /// Render every route. Called once at startup; equivalent to a full
    /// static build.
    pub async fn render_all(&self) -> anyhow::Result<usize> {
        let mut rendered: HashMap<String, String> = HashMap::new();

        rendered.insert("/".into(), pages::home_page(&self.season));
        rendered.insert(format!("/{}", self.season), pages::season_page(&self.season));

        for category in horse_repo::get_categories(&self.db).await? {
            let Some(rule) = category.scoring_rule() else {
                tracing::warn!(category = %category.name, rule = %category.rule, "Unknown scoring rule, skipping");
                continue;
            };
            self.render_category(&category, rule, &mut rendered).await?;
        }

        rendered.insert("/chiba".into(), self.render_chiba());

        let count = rendered.len();
        let mut pages = self.pages.write().await;
        *pages = rendered;

        counter!("pages_rendered_total").increment(count as u64);
        gauge!("pages_cached").set(pages.len() as f64);
        tracing::info!(pages = count, "Site rendered");
        Ok(count)
    }

    /// Re-render the pages a new race result shows up on: the pool's
    /// standings, the owner detail, and the horse detail.
    pub async fn revalidate_for_horse(&self, horse: &Horse) -> anyhow::Result<()> {
        let category = horse_repo::get_category_by_id(&self.db, horse.category_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("category {} not found", horse.category_id))?;
        let rule = category
            .scoring_rule()
            .ok_or_else(|| anyhow::anyhow!("category {} has unknown rule {}", category.name, category.rule))?;

        let owner = owner_repo::get_owner_by_id(&self.db, horse.owner_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("owner {} not found", horse.owner_id))?;

        let (owners, horses_with_races) = self.category_data(&category).await?;
        let rule_path = format!("/{}/{}", self.season, rule.path_segment());

        let standings = scoring::owner_standings(rule, &owners, &horses_with_races);
        let standings_html = pages::standings_page(&self.season, rule, &standings);

        let owner_horses: Vec<Horse> = horses_with_races
            .iter()
            .map(|(h, _)| h.clone())
            .filter(|h| h.owner_id == owner.id)
            .collect();
        let owner_html = pages::owner_page(&self.season, rule, &owner, &owner_horses);

        let races = race_repo::get_races_by_horse(&self.db, horse.id).await?;
        let horse_html = self.build_horse_page(rule, &owner, horse, &races);

        let chart_html = (rule == ScoringRule::Odds)
            .then(|| self.build_chart_page(rule, &owners, &horses_with_races));

        let mut count = 3;
        {
            let mut pages = self.pages.write().await;
            pages.insert(rule_path.clone(), standings_html);
            pages.insert(format!("{rule_path}/{}", owner.id), owner_html);
            pages.insert(format!("{rule_path}/{}/{}", owner.id, horse.id), horse_html);
            if let Some(html) = chart_html {
                pages.insert(format!("{rule_path}/chart"), html);
                count += 1;
            }
        }

        counter!("pages_rendered_total").increment(count);
        tracing::info!(horse = %horse.name, rule = %rule, "Pages revalidated");

        self.ping_deploy_hook().await
    }

    async fn render_category(
        &self,
        category: &Category,
        rule: ScoringRule,
        rendered: &mut HashMap<String, String>,
    ) -> anyhow::Result<()> {
        let (owners, horses_with_races) = self.category_data(category).await?;
        let rule_path = format!("/{}/{}", self.season, rule.path_segment());

        let standings = scoring::owner_standings(rule, &owners, &horses_with_races);
        rendered.insert(
            rule_path.clone(),
            pages::standings_page(&self.season, rule, &standings),
        );

        // Only the odds pool gets a progression chart.
        if rule == ScoringRule::Odds {
            rendered.insert(
                format!("{rule_path}/chart"),
                self.build_chart_page(rule, &owners, &horses_with_races),
            );
        }

        for owner in &owners {
            let owner_horses: Vec<Horse> = horses_with_races
                .iter()
                .map(|(h, _)| h.clone())
                .filter(|h| h.owner_id == owner.id)
                .collect();
            rendered.insert(
                format!("{rule_path}/{}", owner.id),
                pages::owner_page(&self.season, rule, owner, &owner_horses),
            );

            for (horse, races) in horses_with_races
                .iter()
                .filter(|(h, _)| h.owner_id == owner.id)
            {
                rendered.insert(
                    format!("{rule_path}/{}/{}", owner.id, horse.id),
                    self.build_horse_page(rule, owner, horse, races),
                );
            }
        }

        Ok(())
    }

    fn build_chart_page(
        &self,
        rule: ScoringRule,
        owners: &[Owner],
        horses_with_races: &[(Horse, Vec<Race>)],
    ) -> String {
        let months = scoring::season_months(&self.season);
        let progressions = scoring::owner_progressions(&months, owners, horses_with_races);
        pages::chart_page(&self.season, rule, &months, &progressions)
    }

    fn build_horse_page(
        &self,
        rule: ScoringRule,
        owner: &Owner,
        horse: &Horse,
        races: &[Race],
    ) -> String {
        let point = scoring::aggregate_race_point(races);
        let record = scoring::career_record(races);
        pages::horse_page(&self.season, rule, owner, horse, races, &point, &record)
    }

    /// Owners plus every horse in the category with its races, in one pass.
    async fn category_data(
        &self,
        category: &Category,
    ) -> anyhow::Result<(Vec<Owner>, Vec<(Horse, Vec<Race>)>)> {
        let owners = owner_repo::get_owners(&self.db).await?;
        let horses = horse_repo::get_horses_by_category(&self.db, category.id).await?;
        let races = race_repo::get_races_for_category(&self.db, category.id).await?;

        let mut by_horse: HashMap<i32, Vec<Race>> = HashMap::new();
        for race in races {
            by_horse.entry(race.horse_id).or_default().push(race);
        }

        let horses_with_races = horses
            .into_iter()
            .map(|horse| {
                let races = by_horse.remove(&horse.id).unwrap_or_default();
                (horse, races)
            })
            .collect();

        Ok((owners, horses_with_races))
    }

    fn render_chiba(&self) -> String {
        let records = match chiba::load_sale_csv(&self.chiba_csv_path) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %self.chiba_csv_path, error = %e, "Chiba sale CSV not loaded");
                Vec::new()
            }
        };
        let owners = chiba::distinct_owners(&records);
        pages::chiba_page(&records, &owners)
    }

    /// Notify the deployment provider, when one is configured. A non-2xx
    /// response or transport error is a regeneration failure.
    async fn ping_deploy_hook(&self) -> anyhow::Result<()> {
        let Some(url) = &self.deploy_hook_url else {
            return Ok(());
        };

        let resp = self
            .http
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("deploy hook unreachable: {e}"))?;

        if !resp.status().is_success() {
            anyhow::bail!("deploy hook returned {}", resp.status());
        }

        Ok(())
    }
}
