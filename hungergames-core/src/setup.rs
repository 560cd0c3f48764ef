//! Setup - build districts from a Panem input file
//!
//! The input is a whitespace-separated token stream:
//!
//! ```text
//! <district count>
//! <district id> ...
//! <person count>
//! <first> <last> <birth month> <age> <district id> <effectiveness>
//! ...
//! ```
//!
//! Districts come back in input order. People whose district is not listed
//! are skipped.

use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use rustc_hash::FxHashMap;

use crate::district::{District, DistrictId};
use crate::error::SetupError;
use crate::person::Person;

/// Parse districts and their people from input text
pub fn parse_panem(input: &str) -> Result<Vec<District>, SetupError> {
    let mut tokens = Tokens::new(input);

    let district_count: usize = tokens.parse("district count")?;
    let mut districts = Vec::with_capacity(district_count.min(1024));
    let mut index: FxHashMap<DistrictId, usize> = FxHashMap::default();

    for _ in 0..district_count {
        let id: DistrictId = tokens.parse("district id")?;
        if index.insert(id, districts.len()).is_some() {
            return Err(SetupError::DuplicateDistrict(id));
        }
        districts.push(District::new(id));
    }

    let person_count: usize = tokens.parse("person count")?;
    let mut skipped = 0usize;

    for _ in 0..person_count {
        let first_name = tokens.next_token("first name")?;
        let last_name = tokens.next_token("last name")?;
        let birth_month: u8 = tokens.parse("birth month")?;
        let age: u32 = tokens.parse("age")?;
        let district_id: DistrictId = tokens.parse("district id")?;
        let effectiveness: i32 = tokens.parse("effectiveness")?;

        if !(1..=12).contains(&birth_month) {
            return Err(SetupError::InvalidBirthMonth {
                name: format!("{} {}", first_name, last_name),
                month: birth_month,
            });
        }

        let person = Person::new(
            first_name,
            last_name,
            birth_month,
            age,
            district_id,
            effectiveness,
        );

        match index.get(&district_id) {
            Some(&i) => districts[i].add_person(person),
            None => {
                skipped += 1;
                tracing::warn!(
                    "Skipping {}: district {} is not listed",
                    person.full_name(),
                    district_id
                );
            }
        }
    }

    tracing::debug!(
        "Parsed {} districts, {} people ({} skipped)",
        districts.len(),
        person_count - skipped,
        skipped
    );

    Ok(districts)
}

/// Read and parse an input file
pub fn load_panem(path: &Path) -> Result<Vec<District>, SetupError> {
    let content = std::fs::read_to_string(path).map_err(|source| SetupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_panem(&content)
}

/// Token cursor that remembers its position for error messages
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
            position: 0,
        }
    }

    fn next_token(&mut self, expected: &'static str) -> Result<&'a str, SetupError> {
        let token = self
            .inner
            .next()
            .ok_or(SetupError::UnexpectedEof { expected })?;
        self.position += 1;
        Ok(token)
    }

    fn parse<T: FromStr>(&mut self, expected: &'static str) -> Result<T, SetupError> {
        let token = self.next_token(expected)?;
        token.parse().map_err(|_| SetupError::InvalidToken {
            position: self.position,
            token: token.to_string(),
            expected,
        })
    }
}
