#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use chrono::{Duration, Weekday};
    use salonbook_config::{
        AppConfig, BusinessConfig, PolicyConfig, ProfessionalConfig, ServerConfig, ServiceConfig,
        WorkingHoursConfig,
    };
    use uuid::Uuid;

    fn hours(day: &str) -> WorkingHoursConfig {
        WorkingHoursConfig {
            day: day.to_string(),
            start: "09:00".to_string(),
            end: "18:00".to_string(),
            break_start: Some("12:00".to_string()),
            break_end: Some("13:00".to_string()),
        }
    }

    fn base_config() -> (AppConfig, Uuid, Uuid) {
        let professional_id = Uuid::new_v4();
        let service_id = Uuid::new_v4();
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8086,
            },
            business: BusinessConfig {
                id: Uuid::new_v4(),
                name: "Chez Ana".to_string(),
                time_zone: "Europe/Zurich".to_string(),
                scheduling_interval_minutes: 30,
            },
            policy: PolicyConfig::default(),
            professionals: vec![ProfessionalConfig {
                id: professional_id,
                name: "Ana".to_string(),
                working_hours: vec![hours("Mon"), hours("Tue")],
            }],
            services: vec![ServiceConfig {
                id: service_id,
                name: "Haircut".to_string(),
                duration_minutes: 60,
                price: 4500,
                professionals: vec![professional_id],
            }],
        };
        (config, professional_id, service_id)
    }

    #[test]
    fn test_valid_config_builds_a_catalog() {
        let (config, professional_id, service_id) = base_config();
        let catalog = Catalog::from_config(&config).unwrap();

        assert_eq!(catalog.interval, Duration::minutes(30));
        assert_eq!(catalog.time_zone.name(), "Europe/Zurich");
        let service = catalog.service(service_id).unwrap();
        assert_eq!(service.duration_minutes, 60);
        assert!(service.eligible_professionals.contains(&professional_id));
        let schedule = catalog.schedule(professional_id).unwrap();
        assert!(schedule.for_day(Weekday::Mon).is_some());
        assert!(schedule.for_day(Weekday::Sun).is_none());
        assert_eq!(catalog.professional(professional_id).unwrap().name, "Ana");
    }

    #[test]
    fn test_unknown_time_zone_is_rejected() {
        let (mut config, _, _) = base_config();
        config.business.time_zone = "Mars/Olympus_Mons".to_string();
        assert!(Catalog::from_config(&config).is_err());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let (mut config, _, _) = base_config();
        config.business.scheduling_interval_minutes = 0;
        assert!(Catalog::from_config(&config).is_err());
    }

    #[test]
    fn test_malformed_times_and_days_are_rejected() {
        let (mut config, _, _) = base_config();
        config.professionals[0].working_hours[0].start = "9 o'clock".to_string();
        assert!(Catalog::from_config(&config).is_err());

        let (mut config, _, _) = base_config();
        config.professionals[0].working_hours[0].day = "Monday".to_string();
        assert!(Catalog::from_config(&config).is_err());

        // Break outside the working day
        let (mut config, _, _) = base_config();
        config.professionals[0].working_hours[0].break_start = Some("08:00".to_string());
        assert!(Catalog::from_config(&config).is_err());
    }

    #[test]
    fn test_dangling_professional_reference_is_rejected() {
        let (mut config, _, _) = base_config();
        config.services[0].professionals.push(Uuid::new_v4());
        assert!(Catalog::from_config(&config).is_err());
    }

    #[test]
    fn test_negative_policy_values_are_rejected() {
        let (mut config, _, _) = base_config();
        config.policy.min_notice_hours = -1;
        assert!(Catalog::from_config(&config).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let (mut config, professional_id, _) = base_config();
        config.professionals.push(ProfessionalConfig {
            id: professional_id,
            name: "Ana again".to_string(),
            working_hours: vec![],
        });
        assert!(Catalog::from_config(&config).is_err());
    }
}
