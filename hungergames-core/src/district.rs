//! District - a population bucket split by birth-month parity

use serde::{Deserialize, Serialize};

use crate::person::{Parity, Person};

/// District identifier, the tree key
pub type DistrictId = u32;

/// A district and its two sub-populations
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    id: DistrictId,
    odd_population: Vec<Person>,
    even_population: Vec<Person>,
}

impl District {
    pub fn new(id: DistrictId) -> Self {
        Self {
            id,
            odd_population: Vec::new(),
            even_population: Vec::new(),
        }
    }

    pub fn id(&self) -> DistrictId {
        self.id
    }

    /// Sub-population for the given parity, in insertion order
    pub fn population(&self, parity: Parity) -> &[Person] {
        match parity {
            Parity::Odd => &self.odd_population,
            Parity::Even => &self.even_population,
        }
    }

    pub fn population_mut(&mut self, parity: Parity) -> &mut Vec<Person> {
        match parity {
            Parity::Odd => &mut self.odd_population,
            Parity::Even => &mut self.even_population,
        }
    }

    /// Append a person to the sub-population matching their birth month
    pub fn add_person(&mut self, person: Person) {
        self.population_mut(person.parity()).push(person);
    }

    pub fn contains(&self, person: &Person) -> bool {
        self.population(person.parity()).contains(person)
    }

    /// Remove the first entry equal to `person`. Returns false if absent.
    pub fn remove_person(&mut self, person: &Person) -> bool {
        let population = self.population_mut(person.parity());
        match population.iter().position(|p| p == person) {
            Some(idx) => {
                population.remove(idx);
                true
            }
            None => false,
        }
    }

    /// A district with an empty half is out of the game
    pub fn is_depleted(&self) -> bool {
        self.odd_population.is_empty() || self.even_population.is_empty()
    }

    pub fn population_size(&self) -> usize {
        self.odd_population.len() + self.even_population.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_person_routes_by_parity() {
        let mut d = District::new(4);
        d.add_person(Person::new("Odd", "One", 7, 20, 4, 10));
        d.add_person(Person::new("Even", "One", 8, 20, 4, 10));
        d.add_person(Person::new("Even", "Two", 2, 20, 4, 10));

        assert_eq!(d.population(Parity::Odd).len(), 1);
        assert_eq!(d.population(Parity::Even).len(), 2);
        assert_eq!(d.population_size(), 3);
        assert!(!d.is_depleted());
    }

    #[test]
    fn test_remove_person() {
        let mut d = District::new(4);
        let p = Person::new("Odd", "One", 7, 20, 4, 10);
        d.add_person(p.clone());
        d.add_person(Person::new("Even", "One", 8, 20, 4, 10));

        assert!(d.contains(&p));
        assert!(d.remove_person(&p));
        assert!(!d.contains(&p));
        assert!(!d.remove_person(&p));
        assert!(d.is_depleted());
    }

    #[test]
    fn test_empty_district_is_depleted() {
        assert!(District::new(1).is_depleted());
    }
}
