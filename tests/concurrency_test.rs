// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Concurrent use of a shared token authority

use std::sync::Arc;

use token_authority::auth::{CredentialStore, TokenAuthority};

const USERS: usize = 64;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_authenticate_and_refresh() {
    let users: CredentialStore = (0..USERS)
        .map(|i| (format!("user{}", i), format!("passwd{}", i)))
        .collect();
    let authority = Arc::new(TokenAuthority::new(b"shared-secret", users));

    let tasks: Vec<_> = (0..USERS)
        .map(|i| {
            let authority = Arc::clone(&authority);
            tokio::spawn(async move {
                let username = format!("user{}", i);
                let token = authority.authenticate(&username, &format!("passwd{}", i))?;
                let refreshed = authority.refresh(&token)?;
                let claims = authority.decode(&refreshed)?;
                Ok::<_, token_authority::auth::AuthError>((username, claims))
            })
        })
        .collect();

    for task in tasks {
        let (username, claims) = task.await.expect("task panicked").expect("auth failed");
        assert_eq!(claims.username, username);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_failures_do_not_affect_successes() {
    let users: CredentialStore = [("user1", "passwd")].into_iter().collect();
    let authority = Arc::new(TokenAuthority::new(b"shared-secret", users));

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let authority = Arc::clone(&authority);
            tokio::spawn(async move {
                let password = if i % 2 == 0 { "passwd" } else { "wrong" };
                (i, authority.authenticate("user1", password))
            })
        })
        .collect();

    for task in tasks {
        let (i, result) = task.await.unwrap();
        assert_eq!(result.is_ok(), i % 2 == 0);
    }
}
