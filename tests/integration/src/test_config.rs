//! Configuration-driven integration tests.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ocsign_auth::{Signer, VerifyOutcome};
    use ocsign_core::{ConfigError, HashAlgorithm, SignerConfig, SignerOptions};

    use crate::{TEST_RESOURCE, signer_from, test_signer};

    #[test]
    fn test_should_use_defaults_for_minimal_options() {
        let config = SignerConfig::new(
            SignerOptions::builder()
                .credential("user")
                .secret_key("secr")
                .build(),
        )
        .unwrap();

        assert_eq!(config.ttl_seconds(), 60);
        assert_eq!(config.algorithm(), HashAlgorithm::Sha512);
        assert_eq!(config.iterations(), 10_000);
        assert_eq!(
            Signer::new(config).algorithm_descriptor(),
            "PBKDF2/10000-SHA512"
        );
    }

    #[test]
    fn test_should_agree_between_json_and_builder_configuration() {
        let from_json: SignerOptions = serde_json::from_str(
            r#"{"credential":"user","secretKey":"secr","iterations":100}"#,
        )
        .unwrap();
        let json_signer = signer_from(from_json);
        let builder_signer = test_signer();

        let issued_at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let a = json_signer.generate_at(TEST_RESOURCE, "GET", issued_at).unwrap();
        let b = builder_signer
            .generate_at(TEST_RESOURCE, "GET", issued_at)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(
            builder_signer.verify_at(&a, "GET", issued_at),
            VerifyOutcome::Ok
        );
    }

    #[test]
    fn test_should_load_signer_from_variable_lookup() {
        let options = SignerOptions::from_lookup(|name| match name {
            "OCSIGN_CREDENTIAL" => Some("svc".to_owned()),
            "OCSIGN_SECRET_KEY" => Some("k".to_owned()),
            "OCSIGN_ITERATIONS" => Some("10".to_owned()),
            _ => None,
        })
        .unwrap();

        let signer = Signer::new(SignerConfig::from_options(options).unwrap());
        let signed = signer.generate(TEST_RESOURCE, "GET").unwrap();
        assert!(signed.contains("OC-Credential=svc"));
        assert_eq!(signer.verify(&signed), VerifyOutcome::Ok);
    }

    #[test]
    fn test_should_refuse_to_build_without_options() {
        let options = SignerOptions::from_lookup(|_| None).unwrap();
        let err = SignerConfig::from_options(options).unwrap_err();
        assert!(matches!(err, ConfigError::OptionsUndefined));
        assert_eq!(err.code(), "OPTIONS_UNDEFINED");
    }
}
