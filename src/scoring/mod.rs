use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{Horse, Owner, Race, ScoringRule};

/// Aggregated scoring output for one horse's race entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacePoint {
    pub total_base_point: Decimal,
    pub total_point: Decimal,
    pub average_odds: Decimal,
}

impl RacePoint {
    pub fn zero() -> Self {
        Self {
            total_base_point: Decimal::ZERO,
            total_point: Decimal::ZERO,
            average_odds: Decimal::ZERO,
        }
    }
}

/// Compute the scoring summary for a horse's races.
///
/// Each race contributes `round(point * odds)` to the weighted total;
/// rounding happens per entry, before summation, so the total always equals
/// the sum of the per-race figures shown on the horse page. The empty list
/// is valid and yields all zeros.
pub fn aggregate_race_point(races: &[Race]) -> RacePoint {
    if races.is_empty() {
        return RacePoint::zero();
    }

    let n = Decimal::from(races.len() as i64);
    let odds_sum: Decimal = races.iter().map(|r| r.odds).sum();
    let average_odds =
        (odds_sum / n).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    let total_base_point: Decimal = races.iter().map(|r| r.point).sum();
    let total_point: Decimal = races.iter().map(|r| entry_point(r)).sum();

    RacePoint {
        total_base_point,
        total_point,
        average_odds,
    }
}

/// Weighted points earned by a single race entry. Midpoints round away
/// from zero, so a 2.5-point product counts as 3.
pub fn entry_point(race: &Race) -> Decimal {
    (race.point * race.odds).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// The total a category's standings rank by.
pub fn ranking_total(rule: ScoringRule, point: &RacePoint) -> Decimal {
    match rule {
        ScoringRule::Odds => point.total_point,
        ScoringRule::Dart => point.total_base_point,
    }
}

// ---------------------------------------------------------------------------
// Career record
// ---------------------------------------------------------------------------

/// Win / second / third / unplaced counts, displayed as "x-x-x-x".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub wins: u32,
    pub seconds: u32,
    pub thirds: u32,
    pub others: u32,
}

pub fn career_record(races: &[Race]) -> CareerRecord {
    races.iter().fold(CareerRecord::default(), |mut rec, race| {
        match race.result {
            1 => rec.wins += 1,
            2 => rec.seconds += 1,
            3 => rec.thirds += 1,
            _ => rec.others += 1,
        }
        rec
    })
}

impl std::fmt::Display for CareerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.wins, self.seconds, self.thirds, self.others
        )
    }
}

// ---------------------------------------------------------------------------
// Owner standings
// ---------------------------------------------------------------------------

/// One row of a category's standings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerStanding {
    pub owner_id: i32,
    pub owner_name: String,
    pub total: Decimal,
}

/// Rank owners by the sum of their horses' totals under the given rule,
/// descending. Owners with no horses in the category still appear with a
/// zero total.
pub fn owner_standings(
    rule: ScoringRule,
    owners: &[Owner],
    horses_with_races: &[(Horse, Vec<Race>)],
) -> Vec<OwnerStanding> {
    let mut standings: Vec<OwnerStanding> = owners
        .iter()
        .map(|owner| {
            let total = horses_with_races
                .iter()
                .filter(|(horse, _)| horse.owner_id == owner.id)
                .map(|(_, races)| ranking_total(rule, &aggregate_race_point(races)))
                .sum();
            OwnerStanding {
                owner_id: owner.id,
                owner_name: owner.name.clone(),
                total,
            }
        })
        .collect();

    standings.sort_by(|a, b| b.total.cmp(&a.total));
    standings
}

// ---------------------------------------------------------------------------
// Season progression
// ---------------------------------------------------------------------------

/// One owner's running weighted-point total, one entry per season month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerProgression {
    pub owner_id: i32,
    pub owner_name: String,
    pub cumulative: Vec<Decimal>,
}

/// The months a "YYYY-YYYY" season spans: June of the first year through
/// October of the second. A season string without a year prefix yields an
/// empty span.
pub fn season_months(season: &str) -> Vec<(i32, u32)> {
    let Some(start_year) = season
        .split('-')
        .next()
        .and_then(|y| y.parse::<i32>().ok())
    else {
        return Vec::new();
    };

    let mut months = Vec::with_capacity(17);
    for month in 6..=12 {
        months.push((start_year, month));
    }
    for month in 1..=10 {
        months.push((start_year + 1, month));
    }
    months
}

pub fn month_label(year: i32, month: u32) -> String {
    format!("{year}/{month:02}")
}

/// Month-by-month running totals per owner. Each month buckets the races
/// run in it and adds their weighted points to the owner's running sum,
/// so the last entry matches the owner's standings total.
pub fn owner_progressions(
    months: &[(i32, u32)],
    owners: &[Owner],
    horses_with_races: &[(Horse, Vec<Race>)],
) -> Vec<OwnerProgression> {
    use chrono::Datelike;

    owners
        .iter()
        .map(|owner| {
            let mut running = Decimal::ZERO;
            let cumulative = months
                .iter()
                .map(|&(year, month)| {
                    let monthly: Decimal = horses_with_races
                        .iter()
                        .filter(|(horse, _)| horse.owner_id == owner.id)
                        .flat_map(|(_, races)| races.iter())
                        .filter(|r| r.date.year() == year && r.date.month() == month)
                        .map(entry_point)
                        .sum();
                    running += monthly;
                    running
                })
                .collect();
            OwnerProgression {
                owner_id: owner.id,
                owner_name: owner.name.clone(),
                cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Horse, Owner};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn make_race(point: i64, odds: &str, result: i32) -> Race {
        Race {
            id: 0,
            race: "test".into(),
            odds: odds.parse().unwrap(),
            point: Decimal::from(point),
            result,
            date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            horse_id: 1,
        }
    }

    #[test]
    fn test_aggregate_empty_is_all_zero() {
        let rp = aggregate_race_point(&[]);
        assert_eq!(rp, RacePoint::zero());
    }

    #[test]
    fn test_aggregate_two_entries() {
        let races = vec![make_race(2, "3.0", 1), make_race(1, "5.0", 2)];
        let rp = aggregate_race_point(&races);
        assert_eq!(rp.total_base_point, Decimal::from(3));
        // round(2*3) + round(1*5) = 11
        assert_eq!(rp.total_point, Decimal::from(11));
        assert_eq!(rp.average_odds, "4.0".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_aggregate_rounds_per_entry() {
        // 1 * 1.4 rounds to 1 and 1 * 1.4 rounds to 1; the unrounded sum
        // 2.8 would round to 3.
        let races = vec![make_race(1, "1.4", 4), make_race(1, "1.4", 5)];
        let rp = aggregate_race_point(&races);
        assert_eq!(rp.total_point, Decimal::from(2));
    }

    #[test]
    fn test_entry_point_midpoint_rounds_up() {
        let race = make_race(1, "2.5", 1);
        assert_eq!(entry_point(&race), Decimal::from(3));
    }

    #[test]
    fn test_aggregate_is_pure() {
        let races = vec![make_race(2, "3.0", 1), make_race(1, "5.0", 2)];
        let first = aggregate_race_point(&races);
        let second = aggregate_race_point(&races);
        assert_eq!(first, second);
    }

    #[test]
    fn test_average_odds_rounds_to_one_decimal() {
        let races = vec![make_race(1, "2.0", 0), make_race(1, "2.5", 0), make_race(1, "3.0", 0)];
        let rp = aggregate_race_point(&races);
        assert_eq!(rp.average_odds, "2.5".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_career_record_buckets() {
        let races = vec![
            make_race(1, "2.0", 1),
            make_race(1, "2.0", 2),
            make_race(1, "2.0", 3),
            make_race(1, "2.0", 0),
            make_race(1, "2.0", 7),
        ];
        let rec = career_record(&races);
        assert_eq!((rec.wins, rec.seconds, rec.thirds, rec.others), (1, 1, 1, 2));
        assert_eq!(rec.to_string(), "1-1-1-2");
    }

    fn make_horse(id: i32, owner_id: i32) -> Horse {
        Horse {
            id,
            name: format!("horse{id}"),
            gender: "MALE".into(),
            region: "MIHO".into(),
            stable: "stable".into(),
            url: String::new(),
            enabled: true,
            owner_id,
            category_id: 1,
        }
    }

    #[test]
    fn test_owner_standings_sorted_descending() {
        let owners = vec![
            Owner { id: 1, name: "a".into() },
            Owner { id: 2, name: "b".into() },
        ];
        let horses = vec![
            (make_horse(1, 1), vec![make_race(2, "3.0", 1)]), // 6 pt weighted
            (make_horse(2, 2), vec![make_race(10, "2.0", 1)]), // 20 pt weighted
        ];

        let standings = owner_standings(ScoringRule::Odds, &owners, &horses);
        assert_eq!(standings[0].owner_id, 2);
        assert_eq!(standings[0].total, Decimal::from(20));
        assert_eq!(standings[1].total, Decimal::from(6));
    }

    #[test]
    fn test_owner_standings_dart_ignores_odds() {
        let owners = vec![Owner { id: 1, name: "a".into() }];
        let horses = vec![(make_horse(1, 1), vec![make_race(2, "99.0", 1)])];

        let standings = owner_standings(ScoringRule::Dart, &owners, &horses);
        assert_eq!(standings[0].total, Decimal::from(2));
    }

    #[test]
    fn test_owner_without_horses_scores_zero() {
        let owners = vec![Owner { id: 5, name: "empty".into() }];
        let standings = owner_standings(ScoringRule::Odds, &owners, &[]);
        assert_eq!(standings[0].total, Decimal::ZERO);
    }

    fn make_race_on(point: i64, odds: &str, year: i32, month: u32) -> Race {
        let mut race = make_race(point, odds, 1);
        race.date = NaiveDate::from_ymd_opt(year, month, 15).unwrap();
        race
    }

    #[test]
    fn test_season_months_spans_june_to_october() {
        let months = season_months("2022-2023");
        assert_eq!(months.len(), 17);
        assert_eq!(months[0], (2022, 6));
        assert_eq!(months[16], (2023, 10));
        assert!(season_months("nonsense").is_empty());
    }

    #[test]
    fn test_owner_progressions_accumulate_by_month() {
        let owners = vec![Owner { id: 1, name: "a".into() }];
        let horses = vec![(
            make_horse(1, 1),
            vec![
                make_race_on(2, "3.0", 2022, 6),  // 6 pt in the first month
                make_race_on(1, "5.0", 2022, 8),  // 5 pt two months later
            ],
        )];

        let months = season_months("2022-2023");
        let progressions = owner_progressions(&months, &owners, &horses);
        let cumulative = &progressions[0].cumulative;

        assert_eq!(cumulative[0], Decimal::from(6));
        assert_eq!(cumulative[1], Decimal::from(6));
        assert_eq!(cumulative[2], Decimal::from(11));
        // The running sum carries through to the season's last month.
        assert_eq!(cumulative[16], Decimal::from(11));
    }

    #[test]
    fn test_progression_final_month_matches_standings_total() {
        let owners = vec![Owner { id: 1, name: "a".into() }];
        let horses = vec![(
            make_horse(1, 1),
            vec![make_race_on(2, "3.0", 2022, 7), make_race_on(10, "2.0", 2023, 2)],
        )];

        let months = season_months("2022-2023");
        let progressions = owner_progressions(&months, &owners, &horses);
        let standings = owner_standings(ScoringRule::Odds, &owners, &horses);

        assert_eq!(progressions[0].cumulative[16], standings[0].total);
    }
}
