mod health;
pub mod implementations;

pub use health::ServiceHealth;

use crate::logger::{self, LogTag};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// How long `stop_all` waits for each task handle
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Core service trait that all services must implement
#[async_trait]
pub trait Service: Send + Sync {
    /// Unique service identifier
    fn name(&self) -> &'static str;

    /// Service priority (lower = starts earlier, stops later)
    fn priority(&self) -> i32 {
        100
    }

    /// Services this service depends on
    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }

    /// Initialize the service (runs right before `start`)
    async fn initialize(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Start the service; returned handles are awaited on shutdown
    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String>;

    /// Stop the service
    async fn stop(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Check service health
    async fn health(&self) -> ServiceHealth {
        ServiceHealth::Healthy
    }
}

pub struct ServiceManager {
    services: HashMap<&'static str, Box<dyn Service>>,
    handles: HashMap<&'static str, Vec<JoinHandle<()>>>,
    shutdown: Arc<Notify>,
}

impl Default for ServiceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceManager {
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
            handles: HashMap::new(),
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Register a service
    pub fn register(&mut self, service: Box<dyn Service>) {
        let name = service.name();
        self.services.insert(name, service);
    }

    pub fn service_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.services.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Start all registered services in dependency and priority order
    pub async fn start_all(&mut self) -> Result<(), String> {
        let names: Vec<&'static str> = self.services.keys().copied().collect();
        let ordered = self.resolve_startup_order(&names)?;

        logger::debug(LogTag::System, &format!("Service startup order: {:?}", ordered));

        for service_name in ordered {
            if let Some(service) = self.services.get_mut(service_name) {
                logger::debug(LogTag::System, &format!("Initializing service: {}", service_name));
                service
                    .initialize()
                    .await
                    .map_err(|e| format!("Service {} failed to initialize: {}", service_name, e))?;

                let handles = service
                    .start(self.shutdown.clone())
                    .await
                    .map_err(|e| format!("Service {} failed to start: {}", service_name, e))?;
                self.handles.insert(service_name, handles);

                logger::info(LogTag::System, &format!("Service started: {}", service_name));
            }
        }

        Ok(())
    }

    /// Stop all running services in reverse startup order
    pub async fn stop_all(&mut self) -> Result<(), String> {
        logger::info(LogTag::System, "Stopping all services...");

        self.shutdown.notify_waiters();

        let running: Vec<&'static str> = self.handles.keys().copied().collect();
        let mut ordered = self.resolve_startup_order(&running)?;
        ordered.reverse();

        for service_name in ordered {
            if let Some(service) = self.services.get_mut(service_name) {
                if let Err(e) = service.stop().await {
                    logger::warning(
                        LogTag::System,
                        &format!("Service stop error for {}: {}", service_name, e),
                    );
                }

                if let Some(handles) = self.handles.remove(service_name) {
                    for handle in handles {
                        if tokio::time::timeout(STOP_TIMEOUT, handle).await.is_err() {
                            logger::warning(
                                LogTag::System,
                                &format!(
                                    "Service {} did not stop within {}s",
                                    service_name,
                                    STOP_TIMEOUT.as_secs()
                                ),
                            );
                        }
                    }
                }

                logger::info(LogTag::System, &format!("Service stopped: {}", service_name));
            }
        }

        Ok(())
    }

    /// Resolve service startup order
    ///
    /// Dependencies always start before their dependents; among services
    /// whose dependencies are satisfied, lower priority starts first.
    fn resolve_startup_order(
        &self,
        services: &[&'static str],
    ) -> Result<Vec<&'static str>, String> {
        fn visit(
            name: &'static str,
            services: &HashMap<&'static str, Box<dyn Service>>,
            ordered: &mut Vec<&'static str>,
            visited: &mut HashSet<&'static str>,
            visiting: &mut HashSet<&'static str>,
        ) -> Result<(), String> {
            if visited.contains(name) {
                return Ok(());
            }

            if !visiting.insert(name) {
                return Err(format!("Circular dependency detected for service: {}", name));
            }

            let service = services
                .get(name)
                .ok_or_else(|| format!("Unknown service dependency: {}", name))?;

            let mut dependencies = service.dependencies();
            dependencies.sort_by_key(|dep| services.get(dep).map(|s| s.priority()).unwrap_or(100));
            for dep in dependencies {
                visit(dep, services, ordered, visited, visiting)?;
            }

            visiting.remove(name);
            visited.insert(name);
            ordered.push(name);

            Ok(())
        }

        let mut roots = services.to_vec();
        roots.sort_by_key(|name| {
            (
                self.services.get(name).map(|s| s.priority()).unwrap_or(100),
                *name,
            )
        });

        let mut ordered = Vec::new();
        let mut visited = HashSet::new();
        let mut visiting = HashSet::new();

        for service_name in roots {
            visit(service_name, &self.services, &mut ordered, &mut visited, &mut visiting)?;
        }

        Ok(ordered)
    }

    /// Get health status of every registered service
    pub async fn get_health(&self) -> HashMap<&'static str, ServiceHealth> {
        let mut health = HashMap::new();
        for (name, service) in &self.services {
            health.insert(*name, service.health().await);
        }
        health
    }

    /// Log the health of every service, returning the ones that are not healthy
    pub async fn log_health(&self) -> Vec<&'static str> {
        let mut report: Vec<(&'static str, ServiceHealth)> =
            self.get_health().await.into_iter().collect();
        report.sort_by_key(|(name, _)| *name);

        let mut not_healthy = Vec::new();
        for (name, health) in report {
            let line = format!("Service {} is {}", name, health);
            match health {
                ServiceHealth::Healthy => logger::debug(LogTag::System, &line),
                ServiceHealth::Starting => logger::info(LogTag::System, &line),
                ServiceHealth::Degraded(_) | ServiceHealth::Unhealthy(_) => {
                    logger::warning(LogTag::System, &line)
                }
            }
            if !health.is_healthy() {
                not_healthy.push(name);
            }
        }

        not_healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct RecordingService {
        name: &'static str,
        priority: i32,
        dependencies: Vec<&'static str>,
        events: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Service for RecordingService {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn dependencies(&self) -> Vec<&'static str> {
            self.dependencies.clone()
        }

        async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
            self.events.lock().push(format!("start:{}", self.name));
            let events = self.events.clone();
            let name = self.name;
            let notified = shutdown.notified_owned();
            Ok(vec![tokio::spawn(async move {
                notified.await;
                events.lock().push(format!("exit:{}", name));
            })])
        }

        async fn stop(&mut self) -> Result<(), String> {
            self.events.lock().push(format!("stop:{}", self.name));
            Ok(())
        }
    }

    fn service(
        name: &'static str,
        priority: i32,
        dependencies: Vec<&'static str>,
        events: &Arc<Mutex<Vec<String>>>,
    ) -> Box<dyn Service> {
        Box::new(RecordingService {
            name,
            priority,
            dependencies,
            events: events.clone(),
        })
    }

    #[tokio::test]
    async fn test_dependencies_start_first_and_stop_last() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ServiceManager::new();
        // webserver has the lower priority but depends on the updater
        manager.register(service("webserver", 10, vec!["price_updater"], &events));
        manager.register(service("price_updater", 50, vec![], &events));

        manager.start_all().await.unwrap();
        manager.stop_all().await.unwrap();

        let events = events.lock().clone();
        let position = |event: &str| events.iter().position(|e| e == event).unwrap();

        assert!(position("start:price_updater") < position("start:webserver"));
        assert!(position("stop:webserver") < position("stop:price_updater"));
        assert!(events.contains(&"exit:webserver".to_string()));
        assert!(events.contains(&"exit:price_updater".to_string()));
    }

    #[tokio::test]
    async fn test_circular_dependency_is_rejected() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ServiceManager::new();
        manager.register(service("a", 10, vec!["b"], &events));
        manager.register(service("b", 10, vec!["a"], &events));

        let err = manager.start_all().await.unwrap_err();
        assert!(err.contains("Circular dependency"));
    }

    #[tokio::test]
    async fn test_unknown_dependency_is_rejected() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ServiceManager::new();
        manager.register(service("webserver", 10, vec!["missing"], &events));

        let err = manager.start_all().await.unwrap_err();
        assert!(err.contains("missing"));
    }

    struct FixedHealthService {
        name: &'static str,
        health: ServiceHealth,
    }

    #[async_trait]
    impl Service for FixedHealthService {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn start(&mut self, _shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
            Ok(vec![])
        }

        async fn health(&self) -> ServiceHealth {
            self.health.clone()
        }
    }

    #[tokio::test]
    async fn test_health_and_names() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ServiceManager::new();
        manager.register(service("b", 10, vec![], &events));
        manager.register(service("a", 10, vec![], &events));

        assert_eq!(manager.service_names(), vec!["a", "b"]);
        let health = manager.get_health().await;
        assert!(health.values().all(|h| h.is_healthy()));
        assert!(manager.log_health().await.is_empty());
    }

    #[tokio::test]
    async fn test_log_health_reports_services_needing_attention() {
        let mut manager = ServiceManager::new();
        manager.register(Box::new(FixedHealthService {
            name: "webserver",
            health: ServiceHealth::Healthy,
        }));
        manager.register(Box::new(FixedHealthService {
            name: "price_updater",
            health: ServiceHealth::Degraded("stale price".to_string()),
        }));
        manager.register(Box::new(FixedHealthService {
            name: "idle",
            health: ServiceHealth::Starting,
        }));

        assert_eq!(manager.log_health().await, vec!["idle", "price_updater"]);
    }
}
