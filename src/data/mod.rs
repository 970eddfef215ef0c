// Dataset loading and the derived age-bracket column.
//
// The table is loaded once at startup and never mutated afterwards; the
// only derived state is the per-row age bracket, computed lazily behind a
// OnceLock so repeated derivation is idempotent.

pub mod model;

pub use model::{AgeBracket, Passenger};

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug)]
pub enum DataError {
    IoError(io::Error),
    CsvError(csv::Error),
    EmptyDataset,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::IoError(err) => write!(f, "IO error: {}", err),
            DataError::CsvError(err) => write!(f, "CSV error: {}", err),
            DataError::EmptyDataset => write!(f, "dataset contains no records"),
        }
    }
}

impl Error for DataError {}

impl From<io::Error> for DataError {
    fn from(err: io::Error) -> Self {
        DataError::IoError(err)
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::CsvError(err)
    }
}

/// The in-memory passenger table, read-only after load.
pub struct Dataset {
    passengers: Vec<Passenger>,
    age_brackets: OnceLock<Vec<Option<AgeBracket>>>,
}

impl Dataset {
    /// Loads the dataset from a CSV file. A missing file, unreadable
    /// content, or a schema mismatch (missing required columns) is an
    /// error; callers treat it as fatal at startup.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, DataError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut passengers = Vec::new();

        for record in csv_reader.deserialize() {
            let passenger: Passenger = record?;
            passengers.push(passenger);
        }

        if passengers.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        Ok(Self {
            passengers,
            age_brackets: OnceLock::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Per-row age bracket, parallel to `passengers()`. Rows with a
    /// missing or out-of-range age have no bracket.
    pub fn age_brackets(&self) -> &[Option<AgeBracket>] {
        self.age_brackets.get_or_init(|| {
            self.passengers
                .iter()
                .map(|p| p.age.and_then(AgeBracket::from_age))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,1,1,\"Doe, Mrs. Jane\",female,29,0,0,PC 1001,100.00,C85,S
2,0,3,\"Doe, Mr. John\",male,,0,0,A/5 21171,7.25,,C
3,1,2,\"Roe, Miss. Anna\",female,11.5,1,0,237736,30.07,,
";

    #[test]
    fn loads_rows_and_ignores_extra_columns() {
        let dataset = Dataset::from_reader(FIXTURE.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.passengers()[0].pclass, 1);
        assert_eq!(dataset.passengers()[0].sex, "female");
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let dataset = Dataset::from_reader(FIXTURE.as_bytes()).unwrap();
        let second = &dataset.passengers()[1];
        assert_eq!(second.age, None);
        let third = &dataset.passengers()[2];
        assert_eq!(third.embarked, None);
    }

    #[test]
    fn age_brackets_follow_rows() {
        let dataset = Dataset::from_reader(FIXTURE.as_bytes()).unwrap();
        let brackets = dataset.age_brackets();
        assert_eq!(brackets.len(), 3);
        assert_eq!(brackets[0], Some(AgeBracket::YoungAdults));
        assert_eq!(brackets[1], None);
        assert_eq!(brackets[2], Some(AgeBracket::Children));
        // Repeated derivation is idempotent.
        assert_eq!(dataset.age_brackets(), brackets);
    }

    #[test]
    fn schema_mismatch_is_an_error() {
        let csv = "Id,Name\n1,Jane\n";
        match Dataset::from_reader(csv.as_bytes()) {
            Err(DataError::CsvError(_)) => {}
            other => panic!("expected CSV error, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let csv = "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n";
        assert!(matches!(
            Dataset::from_reader(csv.as_bytes()),
            Err(DataError::EmptyDataset)
        ));
    }
}
