use ruledns_application::ports::DnsListenerPort;
use ruledns_application::use_cases::{GetRulesUseCase, ReloadRulesUseCase, UpdateRulesUseCase};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_rules: Arc<GetRulesUseCase>,
    pub update_rules: Arc<UpdateRulesUseCase>,
    pub reload_rules: Arc<ReloadRulesUseCase>,
    pub listener: Arc<dyn DnsListenerPort>,
}
