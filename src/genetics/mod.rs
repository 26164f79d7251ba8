//! Genetics module - individuals, sex, inheritance and mutation.

pub mod breeding;
pub mod crossover;
pub mod individual;
pub mod mutation;
pub mod sex;

pub use breeding::{Breeder, BreedingConfig, BreedingFunction, BreedingOperator};
pub use crossover::{AdaptiveInheritance, PartialInheritance, ZeroInheritance};
pub use individual::{Individual, Locus, LOCUS_COUNT, MAX_LOCUS_VALUE};
pub use mutation::{IndependentMutation, MutationConfig};
pub use sex::Sex;
