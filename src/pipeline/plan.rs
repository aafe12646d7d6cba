//! Building the ordered step list for a deploy

use serde::Serialize;

use super::Step;
use crate::cmd::{Deis, Docker};
use crate::config::settings::Settings;
use crate::config::{DeployConfig, TargetLayout};
use crate::domain::{Deployment, Target};
use crate::error::Result;
use crate::notify::NewRelicNotification;

/// The full, ordered deploy
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub target: Target,
    pub image: String,
    pub steps: Vec<Step>,
}

impl Plan {
    /// Produce every step of a deploy to `layout.target`, in execution order:
    /// registry login and pushes, client install, then per region a
    /// controller login followed by each app's steps. Regions left without
    /// apps get no login.
    pub fn build(
        layout: &TargetLayout,
        settings: &Settings,
        config: &DeployConfig,
    ) -> Result<Self> {
        let docker = Docker::default();
        let deis = Deis::new(config.deis.binary());
        let registry = &settings.registry;
        let rolling = registry.rolling_image(&config.last_build_tag);

        let mut steps = vec![
            Step::command(
                "log in to Docker Hub",
                docker.login(&registry.username, &registry.password),
            ),
            Step::command(
                format!("push {}", registry.image),
                docker.push(&registry.image),
            ),
            Step::command(
                format!("tag {} as {}", registry.image, rolling),
                docker.tag(&registry.image, &rolling),
            ),
            Step::command(format!("push {rolling}"), docker.push(&rolling)),
        ];

        if config.deis.install {
            steps.push(Step::InstallCli {
                script_url: config.deis.install_script_url.clone(),
                dir: config.deis.install_dir.clone(),
            });
        }

        let deployments = layout.deployments();
        for group in deployments.chunk_by(|a, b| a.region == b.region) {
            let region = &group[0].region;
            let controller = config.controller_for(region)?;
            steps.push(Step::command(
                format!("log in to Deis {region}"),
                deis.login(&controller, &settings.paas.username, &settings.paas.password),
            ));

            for Deployment { app, .. } in group {
                if layout.target.is_demo() {
                    steps.push(Step::command(
                        format!("create app {} in {region}", app.name),
                        deis.create_app(&app.name),
                    ));
                    steps.push(Step::command(
                        format!("grant {} access to {}", config.demo.perms_user, app.name),
                        deis.grant_perms(&config.demo.perms_user, &app.name),
                    ));
                    steps.push(Step::command(
                        format!("push config to {}", app.name),
                        deis.push_config(&app.name, &config.demo.config_file),
                    ));
                }

                steps.push(Step::command(
                    format!("deploy {} to {} in {region}", registry.image, app.name),
                    deis.pull(&registry.image, &app.name),
                ));

                if let Some(newrelic) = &settings.newrelic {
                    steps.push(Step::Notify(NewRelicNotification {
                        endpoint: config.newrelic.endpoint.clone(),
                        api_key: newrelic.api_key.clone(),
                        app_name: config.newrelic.app_name_for(&app.name, region),
                        revision: newrelic.revision.clone(),
                        user: newrelic.user.clone(),
                    }));
                }
            }
        }

        Ok(Self {
            target: layout.target,
            image: registry.image.clone(),
            steps,
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvVars;
    use crate::config::settings::tests::base_env;

    fn plan_for(target: Target, extra: &[(&'static str, &'static str)]) -> Plan {
        let mut pairs = base_env();
        pairs.extend_from_slice(extra);
        let vars = EnvVars::from_pairs(pairs);
        let config = DeployConfig::default();
        let layout = TargetLayout::resolve(target, &vars, &config).unwrap();
        let settings = Settings::from_env(&vars).unwrap();
        Plan::build(&layout, &settings, &config).unwrap()
    }

    fn rendered(plan: &Plan) -> Vec<String> {
        plan.steps.iter().map(ToString::to_string).collect()
    }

    const STAGE_APPS: &[(&str, &str)] = &[
        ("DEIS_DEV_APP", "basket-dev"),
        ("DEIS_STAGE_APP", "basket-stage"),
        ("DEIS_ADMIN_STAGE_APP", "basket-admin-stage"),
    ];

    #[test]
    fn test_registry_steps_come_first() {
        let plan = plan_for(Target::Stage, STAGE_APPS);
        let lines = rendered(&plan);
        assert_eq!(lines[0], "docker login --username ci-bot --password-stdin");
        assert_eq!(lines[1], "docker push mozmeao/basket:abc123");
        assert_eq!(
            lines[2],
            "docker tag mozmeao/basket:abc123 mozmeao/basket:last_successful_build"
        );
        assert_eq!(lines[3], "docker push mozmeao/basket:last_successful_build");
        assert!(matches!(plan.steps[4], Step::InstallCli { .. }));
    }

    #[test]
    fn test_stage_plan_order() {
        let plan = plan_for(Target::Stage, STAGE_APPS);
        let deis_lines: Vec<String> = rendered(&plan)
            .into_iter()
            .filter(|l| l.starts_with(".deis-cli/deis"))
            .collect();

        assert_eq!(
            deis_lines,
            vec![
                ".deis-cli/deis login https://deis.us-west.moz.works/ --username deployer --password ********",
                ".deis-cli/deis pull mozmeao/basket:abc123 -a basket-dev",
                ".deis-cli/deis pull mozmeao/basket:abc123 -a basket-stage",
                ".deis-cli/deis pull mozmeao/basket:abc123 -a basket-admin-stage",
                ".deis-cli/deis login https://deis.eu-west.moz.works/ --username deployer --password ********",
                ".deis-cli/deis pull mozmeao/basket:abc123 -a basket-dev",
                ".deis-cli/deis pull mozmeao/basket:abc123 -a basket-stage",
            ]
        );
    }

    #[test]
    fn test_demo_plan_creates_app() {
        let plan = plan_for(Target::Demo, &[("CIRCLE_BRANCH", "demo__new_thing")]);
        let deis_lines: Vec<String> = rendered(&plan)
            .into_iter()
            .filter(|l| l.starts_with(".deis-cli/deis"))
            .collect();

        assert_eq!(deis_lines.len(), 5);
        assert_eq!(
            deis_lines[1],
            ".deis-cli/deis apps:create basket-demo-new-thing --no-remote"
        );
        assert_eq!(
            deis_lines[2],
            ".deis-cli/deis perms:create jenkins -a basket-demo-new-thing  (failure ignored)"
        );
        assert_eq!(
            deis_lines[3],
            ".deis-cli/deis config:push -a basket-demo-new-thing -p demo.env"
        );
        assert_eq!(
            deis_lines[4],
            ".deis-cli/deis pull mozmeao/basket:abc123 -a basket-demo-new-thing"
        );
    }

    #[test]
    fn test_only_perms_is_best_effort() {
        let plan = plan_for(Target::Demo, &[("CIRCLE_BRANCH", "demo__x")]);
        let lenient: Vec<String> = plan
            .steps
            .iter()
            .filter(|s| s.is_best_effort())
            .map(Step::description)
            .collect();
        assert_eq!(lenient, vec!["grant jenkins access to basket-demo-x"]);
    }

    #[test]
    fn test_no_notifications_without_api_key() {
        let plan = plan_for(Target::Stage, STAGE_APPS);
        assert!(!plan.steps.iter().any(|s| matches!(s, Step::Notify(_))));
    }

    #[test]
    fn test_notification_after_each_pull() {
        let mut extra = STAGE_APPS.to_vec();
        extra.extend([
            ("NEWRELIC_API_KEY", "nr-key"),
            ("CIRCLE_USERNAME", "someone"),
            ("CIRCLE_SHA1", "abc123"),
        ]);
        let plan = plan_for(Target::Stage, &extra);

        let notified: Vec<String> = plan
            .steps
            .iter()
            .filter_map(|s| match s {
                Step::Notify(n) => Some(n.app_name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            notified,
            vec![
                "basket-dev-us-west",
                "basket-stage-us-west",
                "basket-admin-stage-us-west",
                "basket-dev-eu-west",
                "basket-stage-eu-west",
            ]
        );
    }

    #[test]
    fn test_plan_without_install() {
        let vars = EnvVars::from_pairs(
            base_env()
                .into_iter()
                .chain(STAGE_APPS.iter().copied()),
        );
        let config = DeployConfig::from_yaml("deis:\n  install: false\n").unwrap();
        let layout = TargetLayout::resolve(Target::Stage, &vars, &config).unwrap();
        let settings = Settings::from_env(&vars).unwrap();
        let plan = Plan::build(&layout, &settings, &config).unwrap();

        assert!(!plan.steps.iter().any(|s| matches!(s, Step::InstallCli { .. })));
        assert!(rendered(&plan).iter().any(|l| l.starts_with("deis login")));
    }

    #[test]
    fn test_json_never_contains_secrets() {
        let mut extra = STAGE_APPS.to_vec();
        extra.extend([
            ("NEWRELIC_API_KEY", "nr-key"),
            ("CIRCLE_USERNAME", "someone"),
            ("CIRCLE_SHA1", "abc123"),
        ]);
        let json = plan_for(Target::Stage, &extra).to_json().unwrap();
        assert!(!json.contains("docker-secret"));
        assert!(!json.contains("deis-secret"));
        assert!(!json.contains("nr-key"));
        assert!(json.contains("\"target\": \"stage\""));
    }
}
