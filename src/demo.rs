//! Demo tool set served by the binary
//!
//! A small weather/monitoring service that shows the three registration shapes: a required
//! parameter, a plain text result, and an optional filter returning structured data.

use serde::Serialize;

use crate::tools::{ParamSpec, RegistryError, ToolDescriptor, ToolOutput, ToolRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredServer {
    pub ip_address: &'static str,
    pub app_name: &'static str,
    pub alarm_info: &'static str,
}

const MONITORED_SERVERS: [MonitoredServer; 2] = [
    MonitoredServer {
        ip_address: "192.168.100.101",
        app_name: "hybrid-cloud-mq-01",
        alarm_info: "/ disk space critically low (used > 95%), reached 95.8326%",
    },
    MonitoredServer {
        ip_address: "192.168.100.102",
        app_name: "env-monitoring-es",
        alarm_info: "nic traffic p2p2 above 500M for more than 30m",
    },
];

pub fn demo_registry() -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();

    registry.register_fn(
        ToolDescriptor::new("getWeather", "Get the current weather for a city")
            .param(ParamSpec::new("city", "City name").required()),
        |args| Ok(format!("{}: sunny, 25C", args.require("city")?).into()),
    )?;

    registry.register_fn(
        ToolDescriptor::new("getSpeciality", "Get the local speciality of a city")
            .param(ParamSpec::new("city", "City name").required()),
        |args| Ok(format!("{} speciality: soup dumplings", args.require("city")?).into()),
    )?;

    registry.register_fn(
        ToolDescriptor::new("getServerInfo", "List monitored servers and their active alarms")
            .param(ParamSpec::new("ipAddress", "Server IP address").optional()),
        |args| {
            let servers = MONITORED_SERVERS
                .iter()
                .filter(|server| {
                    args.get_named("ipAddress")
                        .map_or(true, |ip| ip == server.ip_address)
                })
                .collect::<Vec<_>>();
            ToolOutput::json(&servers)
        },
    )?;

    Ok(registry)
}
