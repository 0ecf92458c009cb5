//! Sign-then-verify integration tests.

#[cfg(test)]
mod tests {
    use ocsign_auth::VerifyOutcome;

    use crate::{TEST_RESOURCE, signer_from, test_options, test_signer};

    #[test]
    fn test_should_accept_freshly_signed_urls() {
        let issuer = test_signer();
        let verifier = test_signer();

        let urls = [
            TEST_RESOURCE,
            "https://cloud.example.com/remote.php/dav/files/user/report.pdf?version=3&x-lang=de",
            "http://localhost:8080/index.php/apps/files/ajax/download.php?dir=%2F&files=a%20b.txt",
            "https://cloud.example.com/files/Stra\u{df}e/\u{fc}ber.txt",
            "https://cloud.example.com/files/a.txt#preview",
        ];

        for url in urls {
            for method in ["GET", "PUT", "PROPFIND", "delete"] {
                let signed = issuer.generate(url, method).unwrap();
                assert_eq!(
                    verifier.verify_with_method(&signed, method),
                    VerifyOutcome::Ok,
                    "round trip failed for {method} {url}"
                );
            }
        }
    }

    #[test]
    fn test_should_bind_signed_method() {
        let signer = test_signer();
        let signed = signer.generate(TEST_RESOURCE, "GET").unwrap();

        assert_eq!(
            signer.verify_with_method(&signed, "POST"),
            VerifyOutcome::Forbidden
        );
        assert_eq!(signer.verify(&signed), VerifyOutcome::Ok);
    }

    #[test]
    fn test_should_resign_previously_signed_url() {
        let signer = test_signer();
        let first = signer.generate(TEST_RESOURCE, "GET").unwrap();
        let second = signer.generate(&first, "PUT").unwrap();

        assert_eq!(
            second.matches("OC-Signature=").count(),
            1,
            "stale signature must be replaced"
        );
        assert_eq!(
            signer.verify_with_method(&second, "PUT"),
            VerifyOutcome::Ok
        );
    }

    #[test]
    fn test_should_round_trip_with_every_supported_algorithm() {
        for algorithm in ["sha1", "sha224", "sha256", "sha384", "sha512"] {
            let mut options = test_options();
            options.algorithm = algorithm.to_owned();
            let signer = signer_from(options);

            let signed = signer.generate(TEST_RESOURCE, "GET").unwrap();
            assert!(signed.contains(&format!(
                "OC-Algo=PBKDF2%2F100-{}",
                algorithm.to_uppercase()
            )));
            assert_eq!(signer.verify(&signed), VerifyOutcome::Ok);
        }
    }

    #[test]
    fn test_should_reject_url_from_differently_configured_signer() {
        let issuer = test_signer();
        let mut options = test_options();
        options.iterations = 101;
        let verifier = signer_from(options);

        let signed = issuer.generate(TEST_RESOURCE, "GET").unwrap();
        assert_eq!(verifier.verify(&signed), VerifyOutcome::Forbidden);
    }

    #[test]
    fn test_should_verify_incoming_http_request() {
        let signer = test_signer();
        let signed = signer.generate(TEST_RESOURCE, "PROPFIND").unwrap();

        let (parts, ()) = http::Request::builder()
            .method("PROPFIND")
            .uri(signed.as_str())
            .body(())
            .unwrap()
            .into_parts();

        assert_eq!(signer.verify_request(&parts, "https"), VerifyOutcome::Ok);
    }
}
