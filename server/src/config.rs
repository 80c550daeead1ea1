use hoops_shared::config::SimConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub tick_rate_hz: u32,
    pub broadcast_rate_hz: u32,
    pub rng_seed: u64,
    /// Let the auto-shooter play while no client is connected
    pub bot_enabled: bool,
    pub sim: SimConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9002".to_string(),
            tick_rate_hz: 60,
            broadcast_rate_hz: 20,
            rng_seed: 42,
            bot_enabled: true,
            sim: SimConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults, with `HOOPS_LISTEN_ADDR` overriding the listen address.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("HOOPS_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("listen_addr must not be empty".to_string());
        }
        if self.tick_rate_hz == 0 {
            return Err("tick_rate_hz must be > 0".to_string());
        }
        if self.broadcast_rate_hz == 0 || self.broadcast_rate_hz > self.tick_rate_hz {
            return Err("broadcast_rate_hz must be within 1..=tick_rate_hz".to_string());
        }
        self.sim.validate()
    }

    /// Broadcast a snapshot every this many ticks.
    pub fn broadcast_every_n(&self) -> u64 {
        (self.tick_rate_hz / self.broadcast_rate_hz).max(1) as u64
    }
}
