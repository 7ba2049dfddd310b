use std::collections::HashMap;
use std::rc::Rc;

use polyseq::{Record, Sequence};

#[derive(Debug, PartialEq)]
struct Timelog {
    activity: &'static str,
    start: (u16, u8, u8),
}

impl Timelog {
    fn date(&self) -> String {
        let (year, month, day) = self.start;
        format!("{year:04}-{month:02}-{day:02}")
    }
}

impl Record for Timelog {}

type Grouped = HashMap<String, Vec<Rc<Timelog>>>;

fn logs() -> Vec<Rc<Timelog>> {
    [
        ("Eating", (2016, 10, 5)),
        ("Coding", (2016, 10, 5)),
        ("Resting", (2016, 10, 5)),
        ("Meeting", (2016, 10, 6)),
        ("Coding", (2016, 10, 6)),
        ("Eating", (2016, 10, 7)),
        ("Coding", (2016, 10, 7)),
        ("Meeting", (2016, 10, 7)),
        ("Coding", (2016, 10, 8)),
        ("Surfing", (2016, 10, 9)),
        ("Eating", (2016, 10, 10)),
        ("Surfing", (2016, 10, 10)),
        ("Talking", (2016, 10, 10)),
        ("Meeting", (2016, 10, 10)),
        ("Coding", (2016, 10, 11)),
        ("Resting", (2016, 10, 11)),
        ("Coding", (2016, 10, 11)),
    ]
    .into_iter()
    .map(|(activity, start)| Rc::new(Timelog { activity, start }))
    .collect()
}

/// Groups by day and keeps `amount` days, skipping the latest `offset`.
fn group_logs_by_hand(logs: &[Rc<Timelog>], amount: usize, offset: usize) -> Grouped {
    let mut grouped: Grouped = HashMap::new();
    for log in logs {
        grouped.entry(log.date()).or_default().push(log.clone());
    }

    let mut days: Vec<String> = grouped.keys().cloned().collect();
    days.sort();
    if amount + offset < days.len() {
        days = days.split_off(days.len() - (amount + offset));
    }
    days.truncate(amount);

    days.into_iter()
        .map(|day| {
            let entries = grouped[&day].clone();
            (day, entries)
        })
        .collect()
}

fn group_logs(logs: &[Rc<Timelog>], amount: usize, offset: usize) -> Grouped {
    let grouped = Sequence::from_vec(logs.to_vec())
        .group_by(|log: &Rc<Timelog>| log.date())
        .unwrap();
    let days = grouped
        .keys()
        .sort()
        .unwrap()
        .last(amount + offset)
        .first(amount);
    grouped
        .only(days)
        .unwrap()
        .to_hash_map::<String, Sequence>()
        .unwrap()
        .into_iter()
        .map(|(day, entries)| (day, entries.to_vec::<Rc<Timelog>>().unwrap()))
        .collect()
}

#[test]
fn test_group_logs_matches_hand_written_loop() {
    let logs = logs();
    for (amount, offset) in [(0, 0), (0, 5), (5, 5), (10, 5), (50, 50), (2, 1)] {
        assert_eq!(
            group_logs_by_hand(&logs, amount, offset),
            group_logs(&logs, amount, offset),
            "amount {amount}, offset {offset}"
        );
    }
}

#[test]
fn test_group_logs_picks_expected_days() {
    let grouped = group_logs(&logs(), 2, 1);
    let mut days: Vec<_> = grouped.keys().cloned().collect();
    days.sort();
    assert_eq!(days, vec!["2016-10-09", "2016-10-10"]);
    let activities: Vec<_> = grouped["2016-10-10"].iter().map(|t| t.activity).collect();
    assert_eq!(activities, vec!["Eating", "Surfing", "Talking", "Meeting"]);
}
