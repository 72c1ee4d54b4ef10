pub mod get;
pub mod reload;
pub mod update;

pub use get::GetRulesUseCase;
pub use reload::ReloadRulesUseCase;
pub use update::UpdateRulesUseCase;
