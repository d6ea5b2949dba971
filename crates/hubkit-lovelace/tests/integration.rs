use axum::body::Body;
use axum::http::{Request, StatusCode};
use hubkit_core::AppConfig;
use hubkit_lovelace::{
    router, DashboardCreate, Lovelace, LovelaceConfig, LovelaceError, Mode, PanelRegistry,
    ResourceCreate, ResourceType, SetupOptions, DOMAIN,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

const CONFIG: &str = r#"
[lovelace]
mode = "storage"

[lovelace.dashboards.energy]
mode = "yaml"
filename = "energy.yaml"
sidebar = { icon = "mdi:flash", title = "Energy" }

[[lovelace.resources]]
type = "module"
url = "/local/ignored.js"
"#;

async fn get_json(lovelace: Arc<RwLock<Lovelace>>, uri: &str) -> serde_json::Value {
    let response = router(lovelace)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_app_config_drives_lovelace_setup() {
    let app = AppConfig::from_toml_str(CONFIG).unwrap();
    let config = LovelaceConfig::from_value(app.lovelace).unwrap();
    let panels = PanelRegistry::new();
    let options = SetupOptions {
        safe_mode: app.general.safe_mode,
        ..Default::default()
    };
    let lovelace = Lovelace::setup(config, panels.clone(), options).unwrap();

    assert_eq!(lovelace.mode(), Mode::Storage);
    assert_eq!(panels.url_paths(), vec!["energy".to_string(), DOMAIN.to_string()]);
    // Storage mode drops the YAML resources.
    assert!(lovelace.resources().is_empty());

    let shared = Arc::new(RwLock::new(lovelace));
    let info = get_json(shared, "/api/lovelace/info").await;
    assert_eq!(
        info,
        serde_json::json!({"mode": "auto-gen"})
    );
}

#[tokio::test]
async fn test_storage_edits_are_visible_over_http() {
    let panels = PanelRegistry::new();
    let shared = Arc::new(RwLock::new(
        Lovelace::setup(LovelaceConfig::default(), panels.clone(), SetupOptions::default())
            .unwrap(),
    ));

    {
        let mut lovelace = shared.write().await;
        lovelace
            .resources_mut()
            .create(ResourceCreate {
                res_type: ResourceType::Js,
                url: "/local/clock.js".to_string(),
            })
            .unwrap();
        let item = lovelace
            .create_dashboard(DashboardCreate {
                url_path: "living-room".to_string(),
                require_admin: false,
                sidebar: None,
            })
            .unwrap();
        assert_eq!(item.id, "living_room");
    }
    assert!(panels.contains("living-room"));

    let resources = get_json(shared.clone(), "/api/lovelace/resources").await;
    assert_eq!(resources[0]["url"], "/local/clock.js");

    let dashboards = get_json(shared.clone(), "/api/lovelace/dashboards").await;
    assert_eq!(dashboards[0]["url_path"], "living-room");

    shared.write().await.delete_dashboard("living_room").unwrap();
    assert!(!panels.contains("living-room"));
    let dashboards = get_json(shared, "/api/lovelace/dashboards").await;
    assert_eq!(dashboards, serde_json::json!([]));
}

#[test]
fn test_safe_mode_from_app_config() {
    let app = AppConfig::from_toml_str(&format!("[general]\nsafe_mode = true\n{CONFIG}")).unwrap();
    let config = LovelaceConfig::from_value(app.lovelace).unwrap();
    let panels = PanelRegistry::new();
    let options = SetupOptions {
        safe_mode: app.general.safe_mode,
        ..Default::default()
    };
    let mut lovelace = Lovelace::setup(config, panels.clone(), options).unwrap();
    assert!(lovelace.dashboards().is_empty());
    assert_eq!(panels.url_paths(), vec![DOMAIN.to_string()]);

    let created = lovelace.create_dashboard(DashboardCreate {
        url_path: "garden".to_string(),
        require_admin: false,
        sidebar: None,
    });
    assert!(matches!(created, Err(LovelaceError::SafeMode)));
    assert_eq!(panels.url_paths(), vec![DOMAIN.to_string()]);
}

#[tokio::test]
async fn test_yaml_dashboards_read_from_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("ui-lovelace.yaml"),
        "title: Home\nviews:\n  - title: Overview\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("energy.yaml"), "views: []\n").unwrap();

    let config = LovelaceConfig::from_toml_str(
        r#"
mode = "yaml"

[dashboards.energy]
mode = "yaml"
filename = "energy.yaml"
"#,
    )
    .unwrap();
    let options = SetupOptions {
        safe_mode: false,
        config_dir: dir.path().to_path_buf(),
    };
    let shared = Arc::new(RwLock::new(
        Lovelace::setup(config, PanelRegistry::new(), options).unwrap(),
    ));

    let info = get_json(shared.clone(), "/api/lovelace/info").await;
    assert_eq!(
        info,
        serde_json::json!({"mode": "yaml", "resources": 0, "views": 1})
    );

    let config = get_json(shared.clone(), "/api/lovelace/config").await;
    assert_eq!(config["title"], "Home");

    let config = get_json(shared, "/api/lovelace/config/energy").await;
    assert_eq!(config, serde_json::json!({"views": []}));
}
