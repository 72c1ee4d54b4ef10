use ruledns_domain::{Decision, DnsQuery, LocalAnswer, RuleSet};
use std::net::IpAddr;
use tracing::debug;

/// Pure decision logic: blacklist, then A-record override, then forward.
pub struct QueryResolver;

impl QueryResolver {
    pub fn decide(rules: &RuleSet, query: &DnsQuery) -> Decision {
        let domain = query.domain.as_ref();

        if rules.is_blacklisted(domain) {
            return Decision::Refuse;
        }

        if query.record_type.is_ipv4_address() {
            if let Some(value) = rules.override_for(domain) {
                match value.parse::<IpAddr>() {
                    Ok(IpAddr::V4(address)) => {
                        return Decision::Answer(LocalAnswer::new(
                            query.domain.clone(),
                            address,
                        ));
                    }
                    Ok(IpAddr::V6(_)) => {
                        debug!(domain = %domain, "IPv6 override cannot answer an A query");
                    }
                    Err(_) => {
                        // Only reachable through a hand-edited rules file.
                        debug!(domain = %domain, value = %value, "Unparseable override ignored");
                    }
                }
            }
        }

        Decision::Forward
    }
}
