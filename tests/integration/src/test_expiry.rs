//! Expiry integration tests.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeDelta, Utc};
    use ocsign_auth::VerifyOutcome;

    use crate::{TEST_RESOURCE, signer_from, test_options};

    #[tokio::test]
    async fn test_should_expire_after_ttl_elapses() {
        let mut options = test_options();
        options.ttl = 2;
        let signer = signer_from(options);

        let signed = signer.generate(TEST_RESOURCE, "GET").unwrap();
        assert_eq!(signer.verify(&signed), VerifyOutcome::Ok);

        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(signer.verify(&signed), VerifyOutcome::Expired);
        assert_eq!(signer.verify(&signed).status_code().as_u16(), 498);
    }

    #[test]
    fn test_should_honour_ttl_from_configuration() {
        let mut options = test_options();
        options.ttl = 3600;
        let signer = signer_from(options);

        let issued_at = Utc::now();
        let signed = signer.generate_at(TEST_RESOURCE, "GET", issued_at).unwrap();

        let within = issued_at + TimeDelta::minutes(59);
        let after = issued_at + TimeDelta::minutes(61);
        assert_eq!(signer.verify_at(&signed, "GET", within), VerifyOutcome::Ok);
        assert_eq!(
            signer.verify_at(&signed, "GET", after),
            VerifyOutcome::Expired
        );
    }

    #[test]
    fn test_should_check_signature_before_expiry() {
        let signer = signer_from(test_options());
        let issued_at = Utc::now() - TimeDelta::hours(1);
        let signed = signer.generate_at(TEST_RESOURCE, "GET", issued_at).unwrap();

        assert_eq!(signer.verify(&signed), VerifyOutcome::Expired);
        assert_eq!(
            signer.verify(&format!("{signed}0")),
            VerifyOutcome::Forbidden
        );
        assert_eq!(
            signer.verify_with_method(&signed, "PUT"),
            VerifyOutcome::Forbidden
        );
    }
}
