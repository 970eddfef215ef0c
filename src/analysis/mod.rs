// Keyword routing and the fixed set of analysis routines.
//
// Routing is an ordered list of (predicate, routine) pairs over the
// lower-cased query; the first predicate that matches wins and the rest
// are never consulted. The ordering is a behavioural contract: a query
// mentioning both "survived" and "gender" answers with the overall
// survival rate because that rule is checked first.

pub mod chart;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::{AgeBracket, Dataset};
use chart::{ChartSpec, ACCENT, COMPLEMENT};

/// Answer to one query: a textual summary, plus a chart for the analyses
/// that have a natural visual. Scalar answers carry no chart and the
/// `plot` key is omitted from the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<ChartSpec>,
}

type Predicate = fn(&str) -> bool;
type Routine = fn(&Dataset) -> AnalysisResult;

const ROUTES: &[(Predicate, Routine)] = &[
    (asks_survival, overall_survival_rate),
    (asks_class, survival_by_class),
    (asks_gender, survival_by_gender),
    (asks_age_histogram, age_histogram),
    (asks_age, survival_by_age_bracket),
    (asks_male_percentage, male_percentage),
    (asks_average_fare, average_fare),
    (asks_port, passengers_by_port),
];

/// Routes a free-text query to the first matching analysis routine, or to
/// the fallback answer when nothing matches.
pub fn answer(dataset: &Dataset, query: &str) -> AnalysisResult {
    let query = query.to_lowercase();

    for (matches, routine) in ROUTES {
        if matches(&query) {
            return routine(dataset);
        }
    }

    fallback()
}

// Predicates, in precedence order.

fn asks_survival(q: &str) -> bool {
    q.contains("survival rate") || q.contains("survived")
}

fn asks_class(q: &str) -> bool {
    q.contains("class")
}

fn asks_gender(q: &str) -> bool {
    q.contains("gender") || q.contains("men") || q.contains("women")
}

fn asks_age_histogram(q: &str) -> bool {
    mentions_age(q) && q.contains("histogram")
}

fn asks_age(q: &str) -> bool {
    mentions_age(q)
}

fn asks_male_percentage(q: &str) -> bool {
    q.contains("percentage of passengers were male")
}

fn asks_average_fare(q: &str) -> bool {
    q.contains("average ticket fare")
}

fn asks_port(q: &str) -> bool {
    q.contains("embarked") || q.contains("port")
}

// "age" has to match as a word, not a substring: "percentage" and
// "average" both contain it, which would shadow the male-percentage and
// average-fare rules below this one.
fn mentions_age(q: &str) -> bool {
    q.split(|c: char| !c.is_ascii_alphabetic())
        .any(|word| word == "age" || word == "ages")
}

// Analysis routines.

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn overall_survival_rate(dataset: &Dataset) -> AnalysisResult {
    let total = dataset.len();
    let survived = dataset
        .passengers()
        .iter()
        .filter(|p| p.survived == 1)
        .count();
    let rate = percentage(survived, total);

    let plot = ChartSpec::pie(
        "Overall Survival Rate",
        &["Survived", "Did Not Survive"],
        vec![survived as u64, (total - survived) as u64],
        &[ACCENT, COMPLEMENT],
    );

    AnalysisResult {
        text: format!(
            "Out of {} passengers, {} survived, resulting in a survival rate of {:.1}%.",
            total, survived, rate
        ),
        plot: Some(plot),
    }
}

fn survival_by_class(dataset: &Dataset) -> AnalysisResult {
    // (count, survivors) per class, ascending class number.
    let mut groups: BTreeMap<u8, (usize, usize)> = BTreeMap::new();
    for p in dataset.passengers() {
        let entry = groups.entry(p.pclass).or_default();
        entry.0 += 1;
        entry.1 += usize::from(p.survived == 1);
    }

    let mut lines = Vec::new();
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (class, (count, survivors)) in &groups {
        let rate = percentage(*survivors, *count);
        lines.push(format!(
            "Class {}: {:.1}% survival rate ({} out of {})",
            class, rate, survivors, count
        ));
        x.push(class.to_string());
        y.push(rate);
    }

    AnalysisResult {
        text: lines.join("\n"),
        plot: Some(ChartSpec::bar(
            "Survival Rate by Passenger Class",
            "Passenger Class",
            "Survival Rate (%)",
            x,
            y,
        )),
    }
}

fn survival_by_gender(dataset: &Dataset) -> AnalysisResult {
    // Alphabetical by sex label, so female before male.
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for p in dataset.passengers() {
        let entry = groups.entry(p.sex.as_str()).or_default();
        entry.0 += 1;
        entry.1 += usize::from(p.survived == 1);
    }

    let mut lines = Vec::new();
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (sex, (count, survivors)) in &groups {
        let rate = percentage(*survivors, *count);
        lines.push(format!(
            "{}: {:.1}% survival rate ({} out of {})",
            sex, rate, survivors, count
        ));
        x.push(sex.to_string());
        y.push(rate);
    }

    AnalysisResult {
        text: lines.join("\n"),
        plot: Some(ChartSpec::bar(
            "Survival Rate by Gender",
            "Gender",
            "Survival Rate (%)",
            x,
            y,
        )),
    }
}

fn age_histogram(dataset: &Dataset) -> AnalysisResult {
    // Rows without an age are left out of the distribution.
    let ages: Vec<f64> = dataset.passengers().iter().filter_map(|p| p.age).collect();

    AnalysisResult {
        text: "Here's a histogram of passenger ages.".to_string(),
        plot: Some(ChartSpec::histogram(
            "Distribution of Passenger Ages",
            "Age",
            ages,
            30,
        )),
    }
}

fn survival_by_age_bracket(dataset: &Dataset) -> AnalysisResult {
    // (count, survivors) per bracket, in the fixed label order. Rows with
    // no bracket (missing or out-of-range age) are excluded.
    let mut groups = [(0usize, 0usize); AgeBracket::ALL.len()];
    for (p, bracket) in dataset.passengers().iter().zip(dataset.age_brackets()) {
        if let Some(bracket) = bracket {
            let entry = &mut groups[*bracket as usize];
            entry.0 += 1;
            entry.1 += usize::from(p.survived == 1);
        }
    }

    let mut lines = Vec::new();
    let mut x = Vec::new();
    let mut y = Vec::new();
    for bracket in AgeBracket::ALL {
        let (count, survivors) = groups[bracket as usize];
        if count == 0 {
            continue;
        }
        let rate = percentage(survivors, count);
        lines.push(format!(
            "{}: {:.1}% survival rate ({} out of {})",
            bracket.label(),
            rate,
            survivors,
            count
        ));
        x.push(bracket.label().to_string());
        y.push(rate);
    }

    AnalysisResult {
        text: lines.join("\n"),
        plot: Some(ChartSpec::bar(
            "Survival Rate by Age Group",
            "Age Group",
            "Survival Rate (%)",
            x,
            y,
        )),
    }
}

fn male_percentage(dataset: &Dataset) -> AnalysisResult {
    let males = dataset
        .passengers()
        .iter()
        .filter(|p| p.sex == "male")
        .count();
    let rate = percentage(males, dataset.len());

    AnalysisResult {
        text: format!("{:.1}% of passengers were male on the Titanic.", rate),
        plot: None,
    }
}

fn average_fare(dataset: &Dataset) -> AnalysisResult {
    let fares: Vec<f64> = dataset.passengers().iter().filter_map(|p| p.fare).collect();

    let text = if fares.is_empty() {
        "The average ticket fare is not available for this dataset.".to_string()
    } else {
        let avg = fares.iter().sum::<f64>() / fares.len() as f64;
        format!("The average ticket fare was ${:.2}.", avg)
    };

    AnalysisResult { text, plot: None }
}

fn passengers_by_port(dataset: &Dataset) -> AnalysisResult {
    // Count per embarkation code, alphabetical; rows with no recorded
    // port are excluded.
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for p in dataset.passengers() {
        if let Some(port) = &p.embarked {
            *counts.entry(port.as_str()).or_default() += 1;
        }
    }

    let x: Vec<String> = counts.keys().map(|port| port.to_string()).collect();
    let y: Vec<f64> = counts.values().map(|count| *count as f64).collect();

    AnalysisResult {
        text: "Here’s a breakdown of how many passengers embarked from each port.".to_string(),
        plot: Some(ChartSpec::bar(
            "Number of Passengers by Embarkation Port",
            "Embarkation Port",
            "Count",
            x,
            y,
        )),
    }
}

fn fallback() -> AnalysisResult {
    AnalysisResult {
        text: "I'm not sure how to answer that question. Try asking about survival rates, \
               demographics, or fares!"
            .to_string(),
        plot: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart::Trace;

    // Ten passengers with known aggregates: 4 survivors, one missing age,
    // one missing fare, one missing embarkation port.
    const FIXTURE: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,1,1,\"A, Mrs.\",female,29,0,0,T1,100.00,C1,S
2,1,1,\"B, Mrs.\",female,50,0,0,T2,80.00,C2,C
3,0,1,\"C, Mr.\",male,65,0,0,T3,60.00,,S
4,1,2,\"D, Miss.\",female,11,0,1,T4,30.00,,Q
5,0,2,\"E, Mr.\",male,30,0,0,T5,25.00,,S
6,0,2,\"F, Mr.\",male,,0,0,T6,15.00,,C
7,1,3,\"G, Miss.\",female,12,0,0,T7,10.00,,S
8,0,3,\"H, Mr.\",male,20,0,0,T8,8.00,,Q
9,0,3,\"I, Mr.\",male,40,0,0,T9,,,C
10,0,3,\"J, Master.\",male,2,0,0,T10,7.00,,
";

    fn fixture() -> Dataset {
        Dataset::from_reader(FIXTURE.as_bytes()).unwrap()
    }

    #[test]
    fn overall_survival_rate_text_and_pie() {
        let result = answer(&fixture(), "What was the overall survival rate?");
        assert_eq!(
            result.text,
            "Out of 10 passengers, 4 survived, resulting in a survival rate of 40.0%."
        );
        let plot = result.plot.expect("survival rate answer carries a pie");
        match &plot.data[0] {
            Trace::Pie { labels, values, .. } => {
                assert_eq!(labels, &["Survived", "Did Not Survive"]);
                assert_eq!(values, &[4, 6]);
            }
            other => panic!("expected pie trace, got {:?}", other),
        }
    }

    #[test]
    fn survived_keyword_takes_precedence_over_everything() {
        // "men", "class", "age" and "port" are all present, but "survived"
        // is checked first.
        let result = answer(
            &fixture(),
            "How many men in each class and age group survived per port?",
        );
        assert!(result.text.starts_with("Out of 10 passengers"));
    }

    #[test]
    fn class_outranks_gender() {
        let result = answer(&fixture(), "Compare class and gender");
        assert!(result.text.starts_with("Class 1:"));
    }

    #[test]
    fn survival_by_class_lines_ascend_by_class() {
        let result = answer(&fixture(), "How did passenger class matter?");
        assert_eq!(
            result.text,
            "Class 1: 66.7% survival rate (2 out of 3)\n\
             Class 2: 33.3% survival rate (1 out of 3)\n\
             Class 3: 25.0% survival rate (1 out of 4)"
        );
        match &result.plot.unwrap().data[0] {
            Trace::Bar { x, y, .. } => {
                assert_eq!(x, &["1", "2", "3"]);
                assert!(y.iter().all(|rate| (0.0..=100.0).contains(rate)));
            }
            other => panic!("expected bar trace, got {:?}", other),
        }
    }

    #[test]
    fn per_class_counts_sum_to_total() {
        let dataset = fixture();
        let result = answer(&dataset, "class breakdown");
        let total: usize = result
            .text
            .lines()
            .map(|line| {
                let (_, tail) = line.rsplit_once("out of ").unwrap();
                tail.trim_end_matches(')').parse::<usize>().unwrap()
            })
            .sum();
        assert_eq!(total, dataset.len());
    }

    #[test]
    fn survival_by_gender_is_alphabetical() {
        let result = answer(&fixture(), "Did gender make a difference?");
        assert_eq!(
            result.text,
            "female: 100.0% survival rate (4 out of 4)\n\
             male: 0.0% survival rate (0 out of 6)"
        );
    }

    #[test]
    fn women_routes_to_gender_analysis() {
        let result = answer(&fixture(), "What about women?");
        assert!(result.text.starts_with("female:"));
    }

    #[test]
    fn age_histogram_skips_missing_ages() {
        let result = answer(&fixture(), "Show me a histogram of ages");
        assert_eq!(result.text, "Here's a histogram of passenger ages.");
        match &result.plot.unwrap().data[0] {
            Trace::Histogram { x, nbinsx, .. } => {
                assert_eq!(x.len(), 9);
                assert_eq!(*nbinsx, 30);
            }
            other => panic!("expected histogram trace, got {:?}", other),
        }
    }

    #[test]
    fn age_without_histogram_gives_bracket_breakdown() {
        let result = answer(&fixture(), "How did age affect survival?");
        assert_eq!(
            result.text,
            "Children: 50.0% survival rate (1 out of 2)\n\
             Young Adults: 66.7% survival rate (2 out of 3)\n\
             Adults: 0.0% survival rate (0 out of 2)\n\
             Elderly: 50.0% survival rate (1 out of 2)"
        );
    }

    #[test]
    fn male_percentage_is_scalar_only() {
        let result = answer(&fixture(), "What percentage of passengers were male?");
        assert_eq!(result.text, "60.0% of passengers were male on the Titanic.");
        assert!(result.plot.is_none());
    }

    #[test]
    fn gender_outranks_male_percentage_phrase() {
        let result = answer(
            &fixture(),
            "By gender, what percentage of passengers were male?",
        );
        assert!(result.text.starts_with("female:"));
    }

    #[test]
    fn average_fare_is_scalar_only() {
        let result = answer(&fixture(), "What was the average ticket fare?");
        assert_eq!(result.text, "The average ticket fare was $37.22.");
        assert!(result.plot.is_none());
    }

    #[test]
    fn average_fare_with_no_fares_reports_unavailable() {
        let csv = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,1,1,\"A, Mrs.\",female,29,0,0,T1,,,S
2,0,3,\"B, Mr.\",male,40,0,0,T2,,,C
";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let result = answer(&dataset, "average ticket fare?");
        assert_eq!(
            result.text,
            "The average ticket fare is not available for this dataset."
        );
        assert!(result.plot.is_none());
    }

    #[test]
    fn port_counts_are_alphabetical_and_skip_missing() {
        let result = answer(&fixture(), "How many passengers embarked from each port?");
        assert_eq!(
            result.text,
            "Here’s a breakdown of how many passengers embarked from each port."
        );
        match &result.plot.unwrap().data[0] {
            Trace::Bar { x, y, .. } => {
                assert_eq!(x, &["C", "Q", "S"]);
                assert_eq!(y, &[3.0, 2.0, 4.0]);
            }
            other => panic!("expected bar trace, got {:?}", other),
        }
    }

    #[test]
    fn unmatched_query_falls_back_without_chart() {
        let result = answer(&fixture(), "What's the weather like?");
        assert_eq!(
            result.text,
            "I'm not sure how to answer that question. Try asking about survival rates, \
             demographics, or fares!"
        );
        assert!(result.plot.is_none());
    }

    #[test]
    fn identical_queries_give_identical_answers() {
        let dataset = fixture();
        let first = answer(&dataset, "What was the overall survival rate?");
        let second = answer(&dataset, "What was the overall survival rate?");
        assert_eq!(first, second);
    }

    #[test]
    fn matching_ignores_case() {
        let result = answer(&fixture(), "WHAT WAS THE OVERALL SURVIVAL RATE?");
        assert!(result.text.starts_with("Out of 10 passengers"));
    }
}
