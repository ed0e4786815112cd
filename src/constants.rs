// Offer grid
pub const DISCR: usize = 100;
pub const GRID_SIZE: usize = DISCR + 1;

// Competition
pub const DEFAULT_AWARD: f64 = 100.0;
pub const ROUNDS_PER_INDIVIDUAL: usize = 10; // default rounds = 10 * population size

// Evolution
pub const DEFAULT_CUTOFF: f64 = 0.1;
pub const MUTATION_STEP: f64 = 1.0 / GRID_SIZE as f64;

// Seeding of initial strategies
pub const NORMAL_MEAN_RANGE: (f64, f64) = (0.0, 1.0);
pub const NORMAL_SIGMA_RANGE: (f64, f64) = (0.05, 0.3);

// Reference run
pub const DEFAULT_EPOCHS: usize = 30_000;
pub const DEFAULT_POPULATION_SIZE: usize = 300;
pub const DEFAULT_ROUNDS_PER_EPOCH: usize = ROUNDS_PER_INDIVIDUAL * 30;

// Tolerance for sum-to-one checks
pub const PROBABILITY_EPSILON: f64 = 1e-9;
