pub mod installment;

pub use installment::compute_installment;
