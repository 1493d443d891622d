//! Entity classification.
//!
//! Lists the topology once, caches every port list, sorts switches into
//! categories and discovers the routers reachable from categorized switches.
//! Static routes of the router set are listed too when the detailed format
//! will need them. The resulting [`Classification`] is read by both graph assemblers and never
//! touches the client again.

use log::{debug, info};
use std::collections::{HashMap, HashSet};

use super::mode::{
    is_plotted_join_switch, is_reserved_switch, resolve_mode, ResolvedMode, CLUSTER_ROUTER,
    EXT_PREFIX, NODE_LOCAL_SWITCH,
};
use super::{router_port_of, PlotError};
use crate::config::{Filter, Format, PlotConfig};
use crate::topology::{
    ClientError, Port, Router, RouterPort, StaticRoute, Switch, TopologyClient,
};

/// Switch category. A switch has at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Endpoint-facing switch (node switches, or every switch in generic OVN)
    Regular,
    /// Inter-router fabric
    Join,
    External,
    /// Drawn exactly like `External`
    NodeLocal,
}

/// Categorize one switch name
pub fn categorize(mode: ResolvedMode, name: &str, filter: &Filter) -> Option<Category> {
    if mode == ResolvedMode::Ovn {
        return filter.is_match(name).then_some(Category::Regular);
    }

    if !is_reserved_switch(name) && filter.is_match(name) {
        Some(Category::Regular)
    } else if is_plotted_join_switch(name, filter) {
        Some(Category::Join)
    } else if name.starts_with(EXT_PREFIX) && filter.is_match(name) {
        Some(Category::External)
    } else if name == NODE_LOCAL_SWITCH {
        Some(Category::NodeLocal)
    } else {
        None
    }
}

/// Classified and cached topology for one render
#[derive(Debug)]
pub struct Classification {
    mode: ResolvedMode,
    filter: Filter,
    /// All switches in listing order
    switches: Vec<Switch>,
    port_cache: HashMap<String, Vec<Port>>,
    categories: HashMap<String, Category>,
    /// Router set in discovery order
    routers: Vec<Router>,
    router_port_cache: HashMap<String, Vec<RouterPort>>,
    /// Router port name to owning router name, across all routers
    port_owners: HashMap<String, String>,
    /// Routers without an entry have no static routes
    static_routes: HashMap<String, Vec<StaticRoute>>,
}

impl Classification {
    /// List, cache and classify the topology behind `client`
    pub fn build(client: &dyn TopologyClient, config: &PlotConfig) -> Result<Self, PlotError> {
        let switches = client.list_switches()?;
        let mode = resolve_mode(config.mode, &switches, &config.filter);

        let mut port_cache = HashMap::with_capacity(switches.len());
        let mut categories = HashMap::new();
        for switch in &switches {
            let ports = client.list_ports(&switch.name)?;
            port_cache.insert(switch.name.clone(), ports);
            if let Some(category) = categorize(mode, &switch.name, &config.filter) {
                categories.insert(switch.name.clone(), category);
            }
        }

        let mut router_port_cache = HashMap::new();
        let mut port_owners = HashMap::new();
        let all_routers = client.list_routers()?;
        for router in &all_routers {
            let ports = client.list_router_ports(&router.name)?;
            for port in &ports {
                port_owners
                    .entry(port.name.clone())
                    .or_insert_with(|| router.name.clone());
            }
            router_port_cache.insert(router.name.clone(), ports);
        }

        let mut classification = Self {
            mode,
            filter: config.filter.clone(),
            switches,
            port_cache,
            categories,
            routers: Vec::new(),
            router_port_cache,
            port_owners,
            static_routes: HashMap::new(),
        };
        classification.discover_routers(&all_routers)?;
        if config.format == Format::Detailed {
            classification.list_static_routes(client)?;
        }

        info!(
            "Classified {} of {} switches, {} routers in the router set ({:?} mode)",
            classification.categories.len(),
            classification.switches.len(),
            classification.routers.len(),
            mode
        );
        Ok(classification)
    }

    fn discover_routers(&mut self, all_routers: &[Router]) -> Result<(), PlotError> {
        let mut included: HashSet<String> = HashSet::new();

        for switch in &self.switches {
            if !self.categories.contains_key(&switch.name) {
                continue;
            }
            for port in self.ports(&switch.name) {
                if !port.port_type.is_router() {
                    continue;
                }
                let router_port = router_port_of(&switch.name, port)?;
                let Some(owner) = self.port_owners.get(router_port) else {
                    debug!(
                        "Router port {} referenced by {}/{} belongs to no router, skipping",
                        router_port, switch.name, port.name
                    );
                    continue;
                };
                let always = self.mode == ResolvedMode::OvnKubernetes && owner == CLUSTER_ROUTER;
                if (always || self.filter.is_match(owner)) && included.insert(owner.clone()) {
                    debug!("Router {} reached from switch {}", owner, switch.name);
                }
            }
        }

        // Keep discovery deterministic: the order routers were listed in.
        let mut ordered = Vec::with_capacity(included.len());
        for router in all_routers {
            if included.remove(&router.name) {
                ordered.push(router.clone());
            }
        }
        self.routers = ordered;
        Ok(())
    }

    fn list_static_routes(&mut self, client: &dyn TopologyClient) -> Result<(), PlotError> {
        for router in &self.routers {
            match client.list_static_routes(&router.name) {
                Ok(routes) => {
                    self.static_routes.insert(router.name.clone(), routes);
                }
                Err(ClientError::NoStaticRoutes(_)) => {
                    debug!("Router {} has no static routes", router.name);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub fn mode(&self) -> ResolvedMode {
        self.mode
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Every listed switch, in listing order
    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    /// Cached ports of a switch
    pub fn ports(&self, switch: &str) -> &[Port] {
        self.port_cache.get(switch).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn category(&self, switch: &str) -> Option<Category> {
        self.categories.get(switch).copied()
    }

    /// Switches whose category is one of `wanted`, in listing order
    pub fn switches_in<'a>(
        &'a self,
        wanted: &'a [Category],
    ) -> impl Iterator<Item = &'a Switch> + 'a {
        self.switches
            .iter()
            .filter(move |s| self.category(&s.name).map_or(false, |c| wanted.contains(&c)))
    }

    /// Switches the detailed view draws: categorized ones and any other matching the filter
    pub fn plotted_switches(&self) -> impl Iterator<Item = &Switch> + '_ {
        self.switches
            .iter()
            .filter(|s| self.categories.contains_key(&s.name) || self.filter.is_match(&s.name))
    }

    /// The router set
    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    /// Static routes of a router-set member, `None` when it has none.
    ///
    /// Only populated for the detailed format.
    pub fn static_routes(&self, router: &str) -> Option<&[StaticRoute]> {
        self.static_routes.get(router).map(Vec::as_slice)
    }

    /// Cached ports of a router
    pub fn router_ports(&self, router: &str) -> &[RouterPort] {
        self.router_port_cache.get(router).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Find the router-set member owning `router_port`, with the port itself
    pub fn find_router_for_port(&self, router_port: &str) -> Option<(&Router, &RouterPort)> {
        let owner = self.port_owners.get(router_port)?;
        let router = self.routers.iter().find(|r| &r.name == owner)?;
        let port = self
            .router_ports(owner)
            .iter()
            .find(|p| p.name == router_port)?;
        Some((router, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::plot::fixtures::snapshot;

    const OVN_KUBE: &str = r#"
switches:
  - name: node1
    ports:
      - name: pod-a
      - name: stor-node1
        type: router
        options:
          router-port: rtos-node1
  - name: join
    ports:
      - name: jtor-ovn_cluster_router
        type: router
        options:
          router-port: rtoj-ovn_cluster_router
      - name: jtor-GR_node1
        type: router
        options:
          router-port: rtoj-GR_node1
  - name: ext_node1
    ports:
      - name: etor-GR_node1
        type: router
        options:
          router-port: rtoe-GR_node1
  - name: node_local_switch
  - name: join_stale
routers:
  - name: ovn_cluster_router
    ports:
      - name: rtos-node1
        networks: ["10.244.0.1/24"]
      - name: rtoj-ovn_cluster_router
        networks: ["100.64.0.1/16"]
  - name: GR_node1
    ports:
      - name: rtoj-GR_node1
        networks: ["100.64.0.2/16"]
      - name: rtoe-GR_node1
        networks: ["172.18.0.2/16"]
  - name: unrelated
"#;

    fn build(yaml: &str, mode: Mode, filter: &str) -> Result<Classification, PlotError> {
        let config = PlotConfig::new(mode, Filter::new(filter).unwrap(), Default::default());
        Classification::build(&snapshot(yaml), &config)
    }

    #[test]
    fn test_static_routes_listed_for_detailed_format_only() {
        let yaml = r#"
switches:
  - name: sw
    ports:
      - name: p
        type: router
        options:
          router-port: rp
routers:
  - name: r
    ports:
      - name: rp
    static_routes:
      - ip_prefix: 10.0.0.0/8
        nexthop: 192.168.0.1
"#;
        let compact = build(yaml, Mode::Ovn, "").unwrap();
        assert!(compact.static_routes("r").is_none());

        let config = PlotConfig::new(Mode::Ovn, Filter::default(), Format::Detailed);
        let detailed = Classification::build(&snapshot(yaml), &config).unwrap();
        let routes = detailed.static_routes("r").unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].nexthop, "192.168.0.1");
    }

    #[test]
    fn test_ovn_kubernetes_categories() {
        let c = build(OVN_KUBE, Mode::Auto, "").unwrap();
        assert_eq!(c.mode(), ResolvedMode::OvnKubernetes);
        assert_eq!(c.category("node1"), Some(Category::Regular));
        assert_eq!(c.category("join"), Some(Category::Join));
        assert_eq!(c.category("join_stale"), Some(Category::Join));
        assert_eq!(c.category("ext_node1"), Some(Category::External));
        assert_eq!(c.category("node_local_switch"), Some(Category::NodeLocal));
    }

    #[test]
    fn test_router_set_in_listing_order() {
        let c = build(OVN_KUBE, Mode::Auto, "").unwrap();
        let names: Vec<&str> = c.routers().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ovn_cluster_router", "GR_node1"]);
        assert!(c.router_ports("unrelated").is_empty());
        assert!(c.find_router_for_port("rtos-node1").is_some());
    }

    #[test]
    fn test_filter_keeps_cluster_router_and_canonical_join() {
        let c = build(OVN_KUBE, Mode::Auto, "^node1$").unwrap();
        assert_eq!(c.category("node1"), Some(Category::Regular));
        assert_eq!(c.category("join"), Some(Category::Join));
        assert_eq!(c.category("join_stale"), None);
        assert_eq!(c.category("ext_node1"), None);
        assert_eq!(c.category("node_local_switch"), Some(Category::NodeLocal));
        let names: Vec<&str> = c.routers().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ovn_cluster_router"]);
    }

    #[test]
    fn test_generic_mode_only_regular() {
        let c = build(OVN_KUBE, Mode::Ovn, "").unwrap();
        assert_eq!(c.mode(), ResolvedMode::Ovn);
        for switch in c.switches() {
            assert_eq!(c.category(&switch.name), Some(Category::Regular));
        }
    }

    #[test]
    fn test_categories_are_disjoint() {
        let c = build(OVN_KUBE, Mode::Auto, "").unwrap();
        let all = [
            Category::Regular,
            Category::Join,
            Category::External,
            Category::NodeLocal,
        ];
        for switch in c.switches() {
            let hits = all
                .iter()
                .filter(|cat| c.switches_in(&[**cat]).any(|s| s.name == switch.name))
                .count();
            assert!(hits <= 1, "{} in {} categories", switch.name, hits);
        }
    }

    #[test]
    fn test_anchored_filter_excludes_substring_match() {
        let yaml = "switches:\n  - name: foo-bar\n  - name: foo\n";
        let c = build(yaml, Mode::Ovn, "^foo$").unwrap();
        assert_eq!(c.category("foo"), Some(Category::Regular));
        assert_eq!(c.category("foo-bar"), None);
    }

    #[test]
    fn test_find_router_for_port() {
        let c = build(OVN_KUBE, Mode::Auto, "").unwrap();
        let (router, port) = c.find_router_for_port("rtoe-GR_node1").unwrap();
        assert_eq!(router.name, "GR_node1");
        assert_eq!(port.networks, vec!["172.18.0.2/16"]);
        assert!(c.find_router_for_port("missing").is_none());
    }

    #[test]
    fn test_unknown_router_port_is_tolerated() {
        let yaml = r#"
switches:
  - name: sw
    ports:
      - name: dangling
        type: router
        options:
          router-port: nowhere
"#;
        let c = build(yaml, Mode::Auto, "").unwrap();
        assert!(c.routers().is_empty());
    }

    #[test]
    fn test_missing_router_port_option_is_fatal() {
        let yaml = r#"
switches:
  - name: sw
    ports:
      - name: broken
        type: router
"#;
        let err = build(yaml, Mode::Auto, "").unwrap_err();
        match err {
            PlotError::MissingRouterPort { switch, port } => {
                assert_eq!(switch, "sw");
                assert_eq!(port, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclassified_switch_still_plotted_in_detail_when_matching() {
        let c = build(OVN_KUBE, Mode::Auto, "").unwrap();
        let plotted: Vec<&str> = c.plotted_switches().map(|s| s.name.as_str()).collect();
        assert_eq!(plotted.len(), c.switches().len());

        let c = build(OVN_KUBE, Mode::Auto, "^node1$").unwrap();
        let plotted: Vec<&str> = c.plotted_switches().map(|s| s.name.as_str()).collect();
        assert_eq!(plotted, vec!["node1", "join", "node_local_switch"]);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let first = build(OVN_KUBE, Mode::Auto, "").unwrap();
        let second = build(OVN_KUBE, Mode::Auto, "").unwrap();
        for switch in first.switches() {
            assert_eq!(first.category(&switch.name), second.category(&switch.name));
        }
        assert_eq!(first.routers(), second.routers());
    }
}
