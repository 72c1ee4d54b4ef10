use ruledns_api::AppState;
use ruledns_application::services::ConfigStore;
use ruledns_application::use_cases::{
    GetRulesUseCase, HandleDnsQueryUseCase, ReloadRulesUseCase, UpdateRulesUseCase,
};
use ruledns_domain::Config;
use ruledns_infrastructure::dns::{DnsListener, DnsServerHandler, UdpForwarder};
use ruledns_infrastructure::repositories::IniRulesPersistence;
use std::net::IpAddr;
use std::sync::Arc;

/// Everything the binary wires together at startup.
pub struct Services {
    pub listener: Arc<DnsListener>,
    pub app_state: AppState,
}

impl Services {
    pub fn new(config: &Config, bind_ip: IpAddr) -> Self {
        let persistence = Arc::new(IniRulesPersistence::new(&config.dns.rules_path));
        let store = Arc::new(ConfigStore::open(persistence));

        let query_use_case = Arc::new(
            HandleDnsQueryUseCase::new(store.clone(), Arc::new(UdpForwarder::new()))
                .with_forward_timeout(config.dns.forward_timeout()),
        );
        let handler = Arc::new(DnsServerHandler::new(query_use_case));
        let listener = Arc::new(DnsListener::new(bind_ip, store.clone(), handler));

        let app_state = AppState {
            get_rules: Arc::new(GetRulesUseCase::new(store.clone())),
            update_rules: Arc::new(UpdateRulesUseCase::new(store.clone(), listener.clone())),
            reload_rules: Arc::new(ReloadRulesUseCase::new(store, listener.clone())),
            listener: listener.clone(),
        };

        Self {
            listener,
            app_state,
        }
    }
}
