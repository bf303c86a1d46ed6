use std::future::Future;

use serenity::model::id::GuildId;

use super::{LoopFlag, SessionManager};

/// Starts a new session for the guild. Any previous session is superseded,
/// so it plays nothing more once this one exists.
pub async fn begin(manager: &SessionManager, guild_id: GuildId, looping: bool) -> LoopFlag {
    let flag = LoopFlag::new(looping);
    let mut sessions = manager.write().await;
    if let Some(previous) = sessions.insert(guild_id, flag.clone()) {
        previous.supersede();
    }
    flag
}

/// Clears the loop flag of the guild's session. Returns whether a session was
/// running.
pub async fn stop(manager: &SessionManager, guild_id: GuildId) -> bool {
    let sessions = manager.read().await;
    match sessions.get(&guild_id) {
        Some(flag) => {
            flag.disable();
            true
        }
        None => false,
    }
}

/// Removes the session if it is still the guild's current one.
pub async fn finish(manager: &SessionManager, guild_id: GuildId, flag: &LoopFlag) {
    let mut sessions = manager.write().await;
    if sessions
        .get(&guild_id)
        .is_some_and(|current| current.same_session(flag))
    {
        sessions.remove(&guild_id);
    }
}

/// Runs `body` as the guild's current session. The session is registered
/// before `body` starts, so `stop` already applies while the voice connection
/// is being set up, and it is removed afterwards whatever `body` returned.
pub async fn scoped<F, Fut, T>(
    manager: &SessionManager,
    guild_id: GuildId,
    looping: bool,
    body: F,
) -> T
where
    F: FnOnce(LoopFlag) -> Fut,
    Fut: Future<Output = T>,
{
    let flag = begin(manager, guild_id, looping).await;
    let result = body(flag.clone()).await;
    finish(manager, guild_id, &flag).await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::new_session_manager;

    async fn is_active(manager: &SessionManager, guild_id: GuildId) -> bool {
        manager.read().await.contains_key(&guild_id)
    }

    #[tokio::test]
    async fn test_begin_replaces_previous() {
        let manager = new_session_manager();
        let gid = GuildId::new(1);

        let first = begin(&manager, gid, true).await;
        let second = begin(&manager, gid, true).await;

        assert!(!first.is_enabled());
        assert!(first.is_superseded());
        assert!(second.is_enabled());
    }

    #[tokio::test]
    async fn test_stale_finish_keeps_current() {
        let manager = new_session_manager();
        let gid = GuildId::new(2);

        let first = begin(&manager, gid, false).await;
        let _second = begin(&manager, gid, false).await;

        finish(&manager, gid, &first).await;
        assert!(is_active(&manager, gid).await);
    }

    #[tokio::test]
    async fn test_stop_without_session() {
        let manager = new_session_manager();
        assert!(!stop(&manager, GuildId::new(3)).await);
    }

    #[tokio::test]
    async fn test_stop_applies_while_connecting() {
        let manager = new_session_manager();
        let gid = GuildId::new(4);

        let result: Result<(), &str> = scoped(&manager, gid, true, |looping| {
            let manager = manager.clone();
            async move {
                // `stop` arrives before the voice connection is up
                assert!(stop(&manager, gid).await);
                assert!(!looping.is_enabled());
                Err("connect timed out")
            }
        })
        .await;

        assert_eq!(result, Err("connect timed out"));
        assert!(!is_active(&manager, gid).await);
    }
}
