//! Use-case implementations.

mod service_use_cases_impl;

pub use service_use_cases_impl::ServiceUseCasesImpl;
