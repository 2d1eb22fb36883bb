pub mod resolve_request;

pub use resolve_request::ResolveDnsRequestUseCase;
