//! Pure page builders: each takes an already-fetched view of the data and
//! returns the finished document. No I/O happens here.

use crate::chiba::{SaleRecord, TableState};
use crate::models::{Horse, Owner, Race, Region, ScoringRule};
use crate::scoring::{entry_point, month_label, CareerRecord, OwnerProgression, OwnerStanding, RacePoint};

use super::html::{breadcrumbs, escape, layout, link};

pub fn home_page(season: &str) -> String {
    let body = format!(
        "<main><ul class=\"seasons\"><li>{}</li><li>{}</li></ul></main>",
        link(&format!("/{season}"), season),
        link("/chiba", "Chiba sale"),
    );
    layout("Home", &body)
}

pub fn season_page(season: &str) -> String {
    let crumbs = breadcrumbs(&[("TOP", Some("/")), (season, None)]);
    let body = format!(
        "{crumbs}<main><ul class=\"pools\"><li>{}</li><li>{}</li></ul></main>",
        link(
            &format!("/{season}/{}", ScoringRule::Odds.path_segment()),
            ScoringRule::Odds.label()
        ),
        link(
            &format!("/{season}/{}", ScoringRule::Dart.path_segment()),
            ScoringRule::Dart.label()
        ),
    );
    layout(season, &body)
}

/// Owner standings for one pool, highest total first.
pub fn standings_page(season: &str, rule: ScoringRule, standings: &[OwnerStanding]) -> String {
    let season_path = format!("/{season}");
    let crumbs = breadcrumbs(&[
        ("TOP", Some("/")),
        (season, Some(season_path.as_str())),
        (rule.label(), None),
    ]);

    let rows: Vec<String> = standings
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td class=\"total\">{}</td></tr>",
                link(
                    &format!("/{season}/{}/{}", rule.path_segment(), s.owner_id),
                    &s.owner_name
                ),
                s.total
            )
        })
        .collect();

    let chart_link = match rule {
        ScoringRule::Odds => format!(
            "<p class=\"chart-link\">{}</p>",
            link(&format!("/{season}/{}/chart", rule.path_segment()), "Progression chart")
        ),
        ScoringRule::Dart => String::new(),
    };

    let body = format!(
        "{crumbs}<main><table class=\"standings\">\
         <thead><tr><th>Owner</th><th>Points</th></tr></thead>\
         <tbody>{}</tbody></table>{chart_link}</main>",
        rows.join("")
    );
    layout(rule.label(), &body)
}

/// Month-by-month running totals for the odds pool, one row per owner.
pub fn chart_page(
    season: &str,
    rule: ScoringRule,
    months: &[(i32, u32)],
    progressions: &[OwnerProgression],
) -> String {
    let rule_path = format!("/{season}/{}", rule.path_segment());
    let season_path = format!("/{season}");
    let crumbs = breadcrumbs(&[
        ("TOP", Some("/")),
        (season, Some(season_path.as_str())),
        (rule.label(), Some(rule_path.as_str())),
        ("Chart", None),
    ]);

    let head: Vec<String> = months
        .iter()
        .map(|&(year, month)| format!("<th>{}</th>", month_label(year, month)))
        .collect();

    let rows: Vec<String> = progressions
        .iter()
        .map(|p| {
            let cells: Vec<String> = p
                .cumulative
                .iter()
                .map(|total| format!("<td>{total}</td>"))
                .collect();
            format!(
                "<tr><th scope=\"row\">{}</th>{}</tr>",
                link(&format!("{rule_path}/{}", p.owner_id), &p.owner_name),
                cells.join("")
            )
        })
        .collect();

    let body = format!(
        "{crumbs}<main><table class=\"progression\">\
         <thead><tr><th>Owner</th>{}</tr></thead>\
         <tbody>{}</tbody></table></main>",
        head.join(""),
        rows.join("")
    );
    layout("Chart", &body)
}

/// An owner's drafted horses within one pool.
pub fn owner_page(season: &str, rule: ScoringRule, owner: &Owner, horses: &[Horse]) -> String {
    let rule_path = format!("/{season}/{}", rule.path_segment());
    let season_path = format!("/{season}");
    let crumbs = breadcrumbs(&[
        ("TOP", Some("/")),
        (season, Some(season_path.as_str())),
        (rule.label(), Some(rule_path.as_str())),
        (owner.name.as_str(), None),
    ]);

    let rows: Vec<String> = horses
        .iter()
        .map(|horse| {
            let class = if horse.enabled {
                "horse"
            } else {
                "horse disqualified"
            };
            format!(
                "<li class=\"{class}\">{}</li>",
                link(&format!("{rule_path}/{}/{}", owner.id, horse.id), &horse.name)
            )
        })
        .collect();

    let body = format!(
        "{crumbs}<main><h1>{}</h1><ul class=\"horses\">{}</ul></main>",
        escape(&owner.name),
        rows.join("")
    );
    layout(&format!("{} standings", owner.name), &body)
}

/// Horse detail: aggregate totals, career record, and the race history
/// newest first.
pub fn horse_page(
    season: &str,
    rule: ScoringRule,
    owner: &Owner,
    horse: &Horse,
    races: &[Race],
    point: &RacePoint,
    record: &CareerRecord,
) -> String {
    let rule_path = format!("/{season}/{}", rule.path_segment());
    let season_path = format!("/{season}");
    let owner_path = format!("{rule_path}/{}", owner.id);
    let crumbs = breadcrumbs(&[
        ("TOP", Some("/")),
        (season, Some(season_path.as_str())),
        (rule.label(), Some(rule_path.as_str())),
        (owner.name.as_str(), Some(owner_path.as_str())),
        (horse.name.as_str(), None),
    ]);

    let stable = stable_badge(horse);
    let average_odds = if point.average_odds.is_zero() {
        "-".to_string()
    } else {
        point.average_odds.to_string()
    };

    let race_rows: Vec<String> = races
        .iter()
        .rev()
        .map(|race| race_item(race))
        .collect();

    let gender_class = horse.gender().map(|g| g.to_string()).unwrap_or_default();
    let name = if horse.url.is_empty() {
        escape(&horse.name)
    } else {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a>",
            escape(&horse.url),
            escape(&horse.name)
        )
    };

    let body = format!(
        "{crumbs}<main>\
         <h1 class=\"{}\">{name}</h1>{stable}\
         <section class=\"results\"><h2>Results</h2><dl>\
         <dt>Total</dt><dd>{} pt</dd>\
         <dt>Base total</dt><dd>{} pt</dd>\
         <dt>Average odds</dt><dd>{average_odds}</dd>\
         <dt>Record</dt><dd>{record}</dd>\
         </dl></section>\
         <section class=\"races\"><h2>Races</h2><ol class=\"race-list\">{}</ol></section>\
         </main>",
        escape(&gender_class),
        point.total_point,
        point.total_base_point,
        race_rows.join("")
    );
    layout(&format!("{} standings", owner.name), &body)
}

/// One race entry, the way the horse page lists them: placing, name, the
/// rounded weighted points and the odds-times-points breakdown.
fn race_item(race: &Race) -> String {
    format!(
        "<li class=\"race result-{}\"><span class=\"placing\">{}</span>\
         <span class=\"name\">{}</span>\
         <span class=\"points\">{} pt</span>\
         <span class=\"detail\">{} &times; {}</span>\
         <span class=\"date\">{}</span></li>",
        race.result,
        race.result,
        escape(&race.race),
        entry_point(race),
        race.odds,
        race.point,
        race.date
    )
}

fn stable_badge(horse: &Horse) -> String {
    let region = horse
        .region()
        .map(|r| r.to_string())
        .unwrap_or_else(|| Region::Local.to_string());
    format!(
        "<p class=\"stable region-{}\">{}</p>",
        escape(&region),
        escape(&horse.stable)
    )
}

/// The Chiba sale table, rendered with the default sort and no filter.
pub fn chiba_page(records: &[SaleRecord], owners: &[String]) -> String {
    let crumbs = breadcrumbs(&[("TOP", Some("/")), ("Chiba sale", None)]);

    let filters: Vec<String> = owners
        .iter()
        .map(|owner| {
            format!(
                "<label><input type=\"checkbox\" checked name=\"owner\" value=\"{0}\">{0}</label>",
                escape(owner)
            )
        })
        .collect();

    let rows: Vec<String> = TableState::default()
        .view(records)
        .iter()
        .map(|record| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&record.owner),
                escape(&record.horse),
                escape(&record.price),
                escape(&record.point)
            )
        })
        .collect();

    let body = format!(
        "{crumbs}<main><form class=\"owner-filter\">{}</form>\
         <table class=\"sale\">\
         <thead><tr><th>Owner</th><th>Horse</th><th>Price</th><th>Point</th></tr></thead>\
         <tbody>{}</tbody></table></main>",
        filters.join(""),
        rows.join("")
    );
    layout("Chiba sale", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn owner() -> Owner {
        Owner {
            id: 3,
            name: "alice".into(),
        }
    }

    fn horse() -> Horse {
        Horse {
            id: 7,
            name: "Thunder <3".into(),
            gender: "MALE".into(),
            region: "MIHO".into(),
            stable: "North Stable".into(),
            url: "https://example.com/horse/7".into(),
            enabled: true,
            owner_id: 3,
            category_id: 1,
        }
    }

    fn race() -> Race {
        Race {
            id: 1,
            race: "Test Stakes".into(),
            odds: "4.5".parse().unwrap(),
            point: Decimal::from(10),
            result: 1,
            date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            horse_id: 7,
        }
    }

    #[test]
    fn test_standings_page_links_owners_in_order() {
        let standings = vec![
            OwnerStanding {
                owner_id: 2,
                owner_name: "bob".into(),
                total: Decimal::from(20),
            },
            OwnerStanding {
                owner_id: 3,
                owner_name: "alice".into(),
                total: Decimal::from(6),
            },
        ];
        let html = standings_page("2022-2023", ScoringRule::Odds, &standings);
        let bob = html.find("/2022-2023/odds/2").unwrap();
        let alice = html.find("/2022-2023/odds/3").unwrap();
        assert!(bob < alice);
        assert!(html.contains("<td class=\"total\">20</td>"));
    }

    #[test]
    fn test_horse_page_escapes_and_shows_totals() {
        let races = vec![race()];
        let point = crate::scoring::aggregate_race_point(&races);
        let record = crate::scoring::career_record(&races);
        let html = horse_page(
            "2022-2023",
            ScoringRule::Odds,
            &owner(),
            &horse(),
            &races,
            &point,
            &record,
        );

        assert!(html.contains("Thunder &lt;3"));
        assert!(html.contains("45 pt")); // round(10 * 4.5)
        assert!(html.contains("1-0-0-0"));
        assert!(html.contains("region-MIHO"));
    }

    #[test]
    fn test_horse_page_dashes_average_odds_when_no_races() {
        let html = horse_page(
            "2022-2023",
            ScoringRule::Odds,
            &owner(),
            &horse(),
            &[],
            &RacePoint::zero(),
            &CareerRecord::default(),
        );
        assert!(html.contains("<dt>Average odds</dt><dd>-</dd>"));
    }

    #[test]
    fn test_owner_page_links_each_horse() {
        let html = owner_page("2022-2023", ScoringRule::Dart, &owner(), &[horse()]);
        assert!(html.contains("/2022-2023/dart/3/7"));
    }

    #[test]
    fn test_standings_page_links_chart_for_odds_only() {
        let html = standings_page("2022-2023", ScoringRule::Odds, &[]);
        assert!(html.contains("/2022-2023/odds/chart"));
        let html = standings_page("2022-2023", ScoringRule::Dart, &[]);
        assert!(!html.contains("/2022-2023/dart/chart"));
        assert!(!html.contains("chart-link"));
    }

    #[test]
    fn test_chart_page_lists_months_and_running_totals() {
        let months = vec![(2022, 6), (2022, 7)];
        let progressions = vec![OwnerProgression {
            owner_id: 3,
            owner_name: "alice".into(),
            cumulative: vec![Decimal::from(6), Decimal::from(11)],
        }];
        let html = chart_page("2022-2023", ScoringRule::Odds, &months, &progressions);

        assert!(html.contains("<th>2022/06</th>"));
        assert!(html.contains("<td>6</td><td>11</td>"));
        assert!(html.contains("/2022-2023/odds/3"));
    }

    #[test]
    fn test_owner_page_marks_disqualified_horses() {
        let mut disqualified = horse();
        disqualified.enabled = false;
        let html = owner_page("2022-2023", ScoringRule::Odds, &owner(), &[disqualified]);
        assert!(html.contains("horse disqualified"));
    }
}
