//! モデル定義
//!
//! caravelで使用されるデータモデルを定義します。
//! 各モデルは機能ごとにモジュールに分離されています。

mod app;
mod resolved;
mod stage;

// Re-exports
pub use app::*;
pub use resolved::*;
pub use stage::*;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_derives_conventional_defaults() {
        let config = AppConfig::new("svc");

        assert_eq!(config.name, "svc");
        assert_eq!(config.display_name, "svc");
        assert_eq!(config.repository_name, "svc");
        assert_eq!(config.cluster_suffix, "cluster");
        assert_eq!(config.service_name, "svc-service");
        assert_eq!(config.task_family, "svc");
        assert_eq!(config.load_balancer_name, "svc-alb");
        assert_eq!(config.target_group_name, "svc-tg");
        assert_eq!(config.container_port, 3000);
        assert_eq!(config.health_check_path, "/");
    }

    #[test]
    fn test_merge_replaces_present_fields_wholesale() {
        let mut config = AppConfig::new("svc");
        let stage_override = StageOverride {
            app: Some(AppOverride {
                container_port: Some(8080),
                service_name: Some("svc-api".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        config.merge(stage_override);

        // 指定されたフィールドだけが置き換わる
        assert_eq!(config.container_port, 8080);
        assert_eq!(config.service_name, "svc-api");
        assert_eq!(config.name, "svc");
        assert_eq!(config.load_balancer_name, "svc-alb");
    }

    #[test]
    fn test_merge_replaces_build_commands_wholesale() {
        let mut config = AppConfig::new("svc");
        config.build.commands = vec!["npm ci".to_string(), "npm run build".to_string()];

        let stage_override = StageOverride {
            build: Some(BuildOverride {
                commands: Some(vec!["npm run build:prod".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };

        config.merge(stage_override);

        assert_eq!(config.build.commands, vec!["npm run build:prod"]);
    }

    #[test]
    fn test_merge_build_args_key_by_key() {
        let mut config = AppConfig::new("svc");
        config
            .build
            .docker_build_args
            .insert("B".to_string(), json!("2"));
        config
            .build
            .docker_build_args
            .insert("C".to_string(), json!("base"));

        let mut build_override = BuildOverride::default();
        build_override
            .docker_build_args
            .insert("A".to_string(), json!("1"));
        build_override
            .docker_build_args
            .insert("C".to_string(), json!("overridden"));

        config.merge(StageOverride {
            build: Some(build_override),
            ..Default::default()
        });

        // オーバーライドが優先、触れられていないキーは残る
        assert_eq!(config.build.docker_build_args["A"], json!("1"));
        assert_eq!(config.build.docker_build_args["B"], json!("2"));
        assert_eq!(config.build.docker_build_args["C"], json!("overridden"));
    }

    #[test]
    fn test_merge_without_override_keeps_base() {
        let mut config = AppConfig::new("svc");
        let before = config.clone();

        config.merge(StageOverride::default());

        assert_eq!(config, before);
    }

    #[test]
    fn test_string_args_excludes_non_strings() {
        let mut config = AppConfig::new("svc");
        config
            .build
            .docker_build_args
            .insert("VERSION".to_string(), json!("1.2.3"));
        config
            .build
            .docker_build_args
            .insert("COUNT".to_string(), json!(3));

        let args = config.build.string_args();

        assert_eq!(args.len(), 1);
        assert_eq!(args["VERSION"], "1.2.3");
    }

    #[test]
    fn test_config_serialization() {
        let mut config = AppConfig::new("svc");
        config
            .build
            .docker_build_args
            .insert("VERSION".to_string(), json!("1.2.3"));

        // JSON シリアライズ
        let serialized = serde_json::to_string(&config).unwrap();
        assert!(serialized.contains("svc-service"));

        // JSON デシリアライズ
        let deserialized: AppConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_stage_override_deserializes_with_defaults() {
        let stage_override: StageOverride = serde_json::from_str("{}").unwrap();
        assert!(stage_override.app.is_none());
        assert!(stage_override.build.is_none());
        assert!(stage_override.naming.is_none());
    }
}
