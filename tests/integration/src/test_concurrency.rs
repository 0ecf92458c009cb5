//! Concurrent use of a shared signer.

#[cfg(test)]
mod tests {
    use futures::future::join_all;
    use ocsign_auth::VerifyOutcome;

    use crate::test_signer;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_sign_and_verify_from_many_tasks() {
        let signer = test_signer();

        let handles = (0..32).map(|i| {
            let signer = signer.clone();
            tokio::task::spawn_blocking(move || {
                let url = format!("https://cloud.example.com/files/doc-{i}.txt");
                let method = if i % 2 == 0 { "GET" } else { "PUT" };
                let signed = signer.generate(&url, method).unwrap();
                (
                    signer.verify_with_method(&signed, method),
                    signer.verify_with_method(&signed, "DELETE"),
                )
            })
        });

        for result in join_all(handles).await {
            let (matching, other) = result.unwrap();
            assert_eq!(matching, VerifyOutcome::Ok);
            assert_eq!(other, VerifyOutcome::Forbidden);
        }
    }
}
