//! End-to-end projection tests over complete profile documents.

#[cfg(test)]
mod integration_tests {
    use crate::{
        ExtendedProfile, IdentityProvider, LinkedInConfig, LinkedInProvider, ProfileDocument,
        ProfileProjector,
    };
    use serde_json::{Value, json};
    use std::time::Duration;

    fn full_profile() -> Value {
        json!({
            "id": "Xy12AbC",
            "firstName": "Margaret",
            "lastName": "Hamilton",
            "emailAddress": "margaret@example.com",
            "headline": "Director of Software Engineering",
            "industry": "Aerospace",
            "publicProfileUrl": "https://www.linkedin.com/in/mhamilton",
            "pictureUrl": "https://media.example.com/mh.jpg",
            "lastModifiedTimestamp": 1_420_070_400_000i64,
            "summary": "Led the onboard flight software team.\nCoined \"software engineering\".",
            "interests": "Sailing\nReliability",
            "certifications": { "_total": 2, "values": [
                { "id": 1, "name": "Certified Reliability Engineer" },
                { "id": 2, "name": "PMP" }
            ]},
            "courses": { "_total": 1, "values": [{ "id": 7, "name": "Abstract Algebra" }] },
            "skills": { "_total": 3, "values": [
                { "id": 1, "skill": { "name": "Real-time Systems" } },
                { "id": 2, "skill": { "name": "Assembly" } },
                { "id": 3, "skill": { "name": "Error Detection" } }
            ]},
            "positions": { "_total": 2, "values": [
                {
                    "company": { "name": "Hamilton Technologies", "industry": "Software" },
                    "title": "CEO",
                    "isCurrent": true,
                    "startDate": { "month": "3", "year": "2020" }
                },
                {
                    "company": { "name": "MIT Instrumentation Lab", "industry": "Research" },
                    "title": "Director",
                    "isCurrent": false,
                    "startDate": { "month": 8, "year": 1961 },
                    "endDate": { "month": 6, "year": 1976 },
                    "summary": "Apollo guidance computer.\nPriority scheduling."
                }
            ]},
            "educations": { "_total": 1, "values": [{
                "schoolName": "Earlham College",
                "degree": "BA",
                "fieldOfStudy": "Mathematics",
                "startDate": { "year": 1954 },
                "endDate": { "year": 1958 }
            }]},
            "projects": { "_total": 2, "values": [
                {
                    "name": "Apollo 11",
                    "description": "Lunar module software\nwith restart protection",
                    "url": "https://example.com/apollo"
                },
                { "name": "USE.IT" }
            ]}
        })
    }

    fn document(value: Value) -> ProfileDocument {
        value.as_object().cloned().expect("fixture is an object")
    }

    fn without(key: &str) -> ProfileDocument {
        let mut document = document(full_profile());
        document.remove(key);
        document
    }

    #[test]
    fn test_full_profile_projection() {
        let source = full_profile();
        let (identity, profile) =
            ProfileProjector::project(&document(source.clone()), "access", "5183999");

        assert_eq!(identity.id.as_deref(), Some("Xy12AbC"));
        assert_eq!(identity.access_token, "access");
        assert_eq!(identity.expires_in, Some(Duration::from_secs(5_183_999)));
        assert_eq!(identity.name.as_deref(), Some("Margaret Hamilton"));
        assert_eq!(identity.profile, source);

        assert_eq!(
            profile.last_modified.map(|t| t.to_rfc3339()),
            Some("2015-01-01T00:00:00+00:00".to_string())
        );
        assert_eq!(
            profile.summary.as_deref(),
            Some("Led the onboard flight software team.<br />Coined \"software engineering\".")
        );
        assert_eq!(profile.interests.as_deref(), Some("Sailing<br />Reliability"));
        assert_eq!(
            profile.certifications,
            Some(vec![
                "Certified Reliability Engineer".to_string(),
                "PMP".to_string()
            ])
        );
        assert_eq!(profile.courses, Some(vec!["Abstract Algebra".to_string()]));
        assert_eq!(
            profile.skills,
            Some(vec![
                "Real-time Systems".to_string(),
                "Assembly".to_string(),
                "Error Detection".to_string()
            ])
        );

        let educations = profile.educations.as_ref().unwrap();
        assert_eq!(educations[0].degree.as_deref(), Some("BA 1954 - 1958"));
        assert_eq!(educations[0].field_of_study.as_deref(), Some("Mathematics"));

        let projects = profile.projects.as_ref().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(
            projects[0].description.as_deref(),
            Some("Lunar module software<br />with restart protection")
        );
        assert_eq!(projects[1].name, "USE.IT");
        assert_eq!(projects[1].description, None);
        assert_eq!(projects[1].url, None);

        let decoded: ExtendedProfile = serde_json::from_str(&identity.extended_profile).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn test_positions_preserve_order_and_count() {
        let source = full_profile();
        let (_, profile) = ProfileProjector::project(&document(source.clone()), "t", "1");
        let positions = profile.positions.unwrap();
        let values = source["positions"]["values"].as_array().unwrap();

        assert_eq!(positions.len(), values.len());
        for (position, value) in positions.iter().zip(values) {
            assert_eq!(position.company, value["company"]["name"].as_str().unwrap());
            assert_eq!(
                position.industry.as_deref(),
                value["company"]["industry"].as_str()
            );
            assert_eq!(position.title, value["title"].as_str().unwrap());
            assert_eq!(
                position.is_current_company,
                value["isCurrent"].as_bool().unwrap()
            );
        }

        assert_eq!(positions[0].start_date, "3 - 2020");
        assert_eq!(positions[0].end_date, None);
        assert_eq!(positions[1].start_date, "8 - 1961");
        assert_eq!(positions[1].end_date.as_deref(), Some("6 - 1976"));
        assert_eq!(
            positions[1].summary.as_deref(),
            Some("Apollo guidance computer.<br />Priority scheduling.")
        );
    }

    #[test]
    fn test_missing_optional_key_only_unsets_that_field() {
        let (_, full) = ProfileProjector::project(&document(full_profile()), "t", "1");

        let keys = [
            "summary",
            "interests",
            "certifications",
            "courses",
            "skills",
            "positions",
            "educations",
            "projects",
        ];
        for key in keys {
            let (_, profile) = ProfileProjector::project(&without(key), "t", "1");

            let mut expected = full.clone();
            match key {
                "summary" => expected.summary = None,
                "interests" => expected.interests = None,
                "certifications" => expected.certifications = None,
                "courses" => expected.courses = None,
                "skills" => expected.skills = None,
                "positions" => expected.positions = None,
                "educations" => expected.educations = None,
                "projects" => expected.projects = None,
                _ => unreachable!(),
            }
            assert_eq!(profile, expected, "dropping {key}");
        }
    }

    #[test]
    fn test_missing_id_leaves_id_unset() {
        let (identity, profile) = ProfileProjector::project(&without("id"), "t", "1");
        assert_eq!(identity.id, None);
        assert!(profile.positions.is_some());
    }

    #[test]
    fn test_expiry_parsing() {
        let source = document(full_profile());

        for (raw, expected) in [
            ("0", Some(Duration::from_secs(0))),
            ("3600", Some(Duration::from_secs(3600))),
            ("", None),
            ("never", None),
            ("3600s", None),
        ] {
            let (identity, _) = ProfileProjector::project(&source, "t", raw);
            assert_eq!(identity.expires_in, expected, "expiry {raw:?}");
        }
    }

    #[test]
    fn test_missing_last_modified_resets_every_list() {
        let (identity, profile) =
            ProfileProjector::project(&without("lastModifiedTimestamp"), "access", "60");

        assert_eq!(profile, ExtendedProfile::empty());
        assert_eq!(profile.certifications, Some(vec![]));
        assert_eq!(profile.educations, Some(vec![]));
        assert_eq!(profile.courses, Some(vec![]));
        assert_eq!(profile.positions, Some(vec![]));
        assert_eq!(profile.skills, Some(vec![]));
        assert_eq!(profile.projects, Some(vec![]));
        assert_eq!(profile.summary, None);

        // Identity extraction is independent of the extended profile.
        assert_eq!(identity.id.as_deref(), Some("Xy12AbC"));
        assert_eq!(identity.access_token, "access");
        assert_eq!(identity.expires_in, Some(Duration::from_secs(60)));

        let decoded: ExtendedProfile = serde_json::from_str(&identity.extended_profile).unwrap();
        assert_eq!(decoded, ExtendedProfile::empty());
    }

    #[test]
    fn test_malformed_nested_structure_resets_profile() {
        let mut source = document(full_profile());
        source.insert(
            "projects".to_string(),
            json!({ "values": [{ "description": "nameless" }] }),
        );

        let (_, profile) = ProfileProjector::project(&source, "t", "1");
        assert_eq!(profile, ExtendedProfile::empty());
    }

    #[test]
    fn test_sparse_elements_keep_the_rest_of_the_profile() {
        let mut source = full_profile();
        source["positions"]["values"][1]["company"]
            .as_object_mut()
            .unwrap()
            .remove("industry");
        source["educations"]["values"][0]
            .as_object_mut()
            .unwrap()
            .remove("fieldOfStudy");

        let (_, full) = ProfileProjector::project(&document(full_profile()), "t", "1");
        let (_, profile) = ProfileProjector::project(&document(source), "t", "1");

        assert_ne!(profile, ExtendedProfile::empty());
        assert_eq!(profile.skills, full.skills);
        assert_eq!(profile.projects, full.projects);

        let positions = profile.positions.unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].industry.as_deref(), Some("Software"));
        assert_eq!(positions[1].industry, None);
        assert_eq!(positions[1].company, "MIT Instrumentation Lab");

        let educations = profile.educations.unwrap();
        assert_eq!(educations[0].field_of_study, None);
        assert_eq!(educations[0].degree.as_deref(), Some("BA 1954 - 1958"));
    }

    #[test]
    fn test_float_timestamp_keeps_profile() {
        let mut source = document(full_profile());
        source.insert("lastModifiedTimestamp".to_string(), json!(1_420_070_400_000.0));

        let (_, profile) = ProfileProjector::project(&source, "t", "1");
        assert_eq!(
            profile.last_modified.map(|t| t.to_rfc3339()),
            Some("2015-01-01T00:00:00+00:00".to_string())
        );
        assert_eq!(profile.positions.map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_empty_collections_project_to_empty_lists() {
        let mut source = document(full_profile());
        source.insert("skills".to_string(), json!({ "_total": 0 }));

        let (_, profile) = ProfileProjector::project(&source, "t", "1");
        assert_eq!(profile.skills, Some(vec![]));
        assert_eq!(profile.positions.map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let source = document(full_profile());

        let first = ProfileProjector::project(&source, "t", "120");
        let second = ProfileProjector::project(&source, "t", "120");
        assert_eq!(first, second);

        let broken = without("lastModifiedTimestamp");
        assert_eq!(
            ProfileProjector::project(&broken, "t", "120"),
            ProfileProjector::project(&broken, "t", "120")
        );
    }

    #[tokio::test]
    async fn test_provider_degrades_instead_of_failing() {
        let provider = LinkedInProvider::new(LinkedInConfig::default());

        let mut profile = full_profile();
        profile
            .as_object_mut()
            .unwrap()
            .remove("lastModifiedTimestamp");

        let identity = provider
            .verify(json!({
                "access_token": "access",
                "expires_in": 60,
                "profile": profile
            }))
            .await
            .unwrap();

        assert_eq!(identity.subject, "Xy12AbC");
        assert_eq!(identity.display_name.as_deref(), Some("Margaret Hamilton"));

        let extended: ExtendedProfile =
            serde_json::from_str(identity.metadata_str("extended_profile").unwrap()).unwrap();
        assert_eq!(extended, ExtendedProfile::empty());
    }

    #[test]
    fn test_projection_runs_on_many_threads() {
        let source = document(full_profile());
        let (_, expected) = ProfileProjector::project(&source, "t", "1");
        let source = &source;

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(move || ProfileProjector::project(source, "t", "1").1))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
