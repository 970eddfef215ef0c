use serde::Deserialize;

/// One row of the passenger manifest. Columns not listed here (name,
/// ticket number, cabin, ...) are ignored on load.
#[derive(Debug, Clone, Deserialize)]
pub struct Passenger {
    /// Binary outcome flag: 1 survived, 0 did not.
    #[serde(rename = "Survived")]
    pub survived: u8,
    /// Class of service, 1 (first) through 3 (third).
    #[serde(rename = "Pclass")]
    pub pclass: u8,
    #[serde(rename = "Sex")]
    pub sex: String,
    /// Age in years; missing for a sizeable share of the manifest.
    #[serde(rename = "Age")]
    pub age: Option<f64>,
    /// Ticket fare in pounds.
    #[serde(rename = "Fare")]
    pub fare: Option<f64>,
    /// Embarkation port code (C, Q or S).
    #[serde(rename = "Embarked")]
    pub embarked: Option<String>,
}

/// Fixed age buckets: [0,12), [12,30), [30,50), [50,100]. Half-open on
/// the left edges, with 100 included in the last bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    Children,
    YoungAdults,
    Adults,
    Elderly,
}

impl AgeBracket {
    /// Reporting order for grouped output.
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::Children,
        AgeBracket::YoungAdults,
        AgeBracket::Adults,
        AgeBracket::Elderly,
    ];

    pub fn from_age(age: f64) -> Option<Self> {
        if age < 0.0 {
            None
        } else if age < 12.0 {
            Some(AgeBracket::Children)
        } else if age < 30.0 {
            Some(AgeBracket::YoungAdults)
        } else if age < 50.0 {
            Some(AgeBracket::Adults)
        } else if age <= 100.0 {
            Some(AgeBracket::Elderly)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Children => "Children",
            AgeBracket::YoungAdults => "Young Adults",
            AgeBracket::Adults => "Adults",
            AgeBracket::Elderly => "Elderly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_edges_are_half_open() {
        assert_eq!(AgeBracket::from_age(0.0), Some(AgeBracket::Children));
        assert_eq!(AgeBracket::from_age(11.9), Some(AgeBracket::Children));
        assert_eq!(AgeBracket::from_age(12.0), Some(AgeBracket::YoungAdults));
        assert_eq!(AgeBracket::from_age(29.9), Some(AgeBracket::YoungAdults));
        assert_eq!(AgeBracket::from_age(30.0), Some(AgeBracket::Adults));
        assert_eq!(AgeBracket::from_age(49.9), Some(AgeBracket::Adults));
        assert_eq!(AgeBracket::from_age(50.0), Some(AgeBracket::Elderly));
        assert_eq!(AgeBracket::from_age(100.0), Some(AgeBracket::Elderly));
    }

    #[test]
    fn out_of_range_ages_have_no_bracket() {
        assert_eq!(AgeBracket::from_age(-1.0), None);
        assert_eq!(AgeBracket::from_age(100.5), None);
    }
}
