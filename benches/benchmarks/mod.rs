pub mod momentum_formulation;
pub mod pair_interaction;
pub mod smoothing_kernel;
