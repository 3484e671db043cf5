/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */

/// Request-scoped identity: present exactly once on an authenticated request,
/// absent on an anonymous one. Never persisted or shared across requests.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: i64,
    pub name: String,
    pub roles: Vec<String>,
}

impl AuthCtx {
    pub fn new(user_id: i64, name: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            roles,
        }
    }
}
