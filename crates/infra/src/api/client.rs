//! Operation dispatcher for the administration API
//!
//! Each public method issues one request (listings one per page), classifies
//! the response and translates the payload. Errors leave annotated with the
//! operation and key, and `NotFound` stays detectable through that context.

use std::future::Future;
use std::sync::Arc;

use hyperstore_core::{collect_pages, qos_query_map, ApiRequest, ApiResponse, Transport};
use hyperstore_domain::{
    ClientConfig, Group, HyperStoreError, ListLimit, QoS, QosTarget, Result, ResultExt,
    SecurityInfo, User, UserListFilter, UserRef,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use super::errors::{check_response, Lookup};
use super::translator::{
    credentials_to_internal, decode, group_to_internal, group_to_wire, qos_to_internal,
    user_to_internal, user_to_wire,
};
use super::wire::{GroupWire, QosWire, SecurityInfoWire, UserWire};
use crate::errors::InfraError;
use crate::http::ReqwestTransport;

const GROUP_PATH: &str = "/group";
const USER_PATH: &str = "/user";
const USER_LIST_PATH: &str = "/user/list";
const CREDENTIALS_PATH: &str = "/user/credentials";
const CREDENTIALS_LIST_PATH: &str = "/user/credentials/list";
const QOS_PATH: &str = "/qos/limits";

/// Client for the HyperStore administration API.
///
/// Cheap to clone; clones share the transport. Holds no mutable state, so one
/// instance can serve concurrent callers.
#[derive(Clone)]
pub struct HyperStoreClient {
    transport: Arc<dyn Transport>,
    list_limit: ListLimit,
}

impl HyperStoreClient {
    /// Build a client talking HTTP(S) to `config.base_url`.
    ///
    /// # Errors
    /// `HyperStoreError::Config` if the configuration is invalid.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::with_transport(Arc::new(transport), config.list_limit()?))
    }

    /// Build a client on top of any [`Transport`].
    pub fn with_transport(transport: Arc<dyn Transport>, list_limit: ListLimit) -> Self {
        Self { transport, list_limit }
    }

    pub fn list_limit(&self) -> ListLimit {
        self.list_limit
    }

    async fn call(
        &self,
        request: ApiRequest,
        lookup: Option<Lookup<'_>>,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse> {
        let response = self.transport.execute(request, cancel).await?;
        check_response(response, lookup)
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Fetch a group by id.
    ///
    /// # Errors
    /// `NotFound` (possibly wrapped) if the group does not exist.
    #[instrument(skip(self, cancel), fields(group_id = %group_id))]
    pub async fn get_group(&self, group_id: &str, cancel: &CancellationToken) -> Result<Group> {
        in_context(|| format!("get group {group_id}"), async {
            let request = ApiRequest::get(GROUP_PATH).query("groupId", group_id);
            let lookup = Lookup::new("group", group_id);
            let response = self.call(request, Some(lookup), cancel).await?;
            group_to_internal(decode::<GroupWire>(&response.body)?)
        })
        .await
    }

    #[instrument(skip(self, group, cancel), fields(group_id = %group.group_id))]
    pub async fn create_group(&self, group: &Group, cancel: &CancellationToken) -> Result<()> {
        in_context(|| format!("create group {}", group.group_id), async {
            group.validate()?;
            let request = ApiRequest::put(GROUP_PATH).json(to_json(&group_to_wire(group))?);
            self.call(request, None, cancel).await?;
            info!("group created");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, group, cancel), fields(group_id = %group.group_id))]
    pub async fn update_group(&self, group: &Group, cancel: &CancellationToken) -> Result<()> {
        in_context(|| format!("update group {}", group.group_id), async {
            group.validate()?;
            let request = ApiRequest::post(GROUP_PATH).json(to_json(&group_to_wire(group))?);
            self.call(request, None, cancel).await?;
            info!("group updated");
            Ok(())
        })
        .await
    }

    /// Delete a group. The API refuses while the group still has users; see
    /// [`Self::delete_group_recursive`].
    #[instrument(skip(self, cancel), fields(group_id = %group_id))]
    pub async fn delete_group(&self, group_id: &str, cancel: &CancellationToken) -> Result<()> {
        in_context(|| format!("delete group {group_id}"), async {
            let request = ApiRequest::delete(GROUP_PATH).query("groupId", group_id);
            self.call(request, None, cancel).await?;
            info!("group deleted");
            Ok(())
        })
        .await
    }

    /// Delete every user of the group, then the group itself.
    ///
    /// Users are deleted one at a time. Cancellation stops before the next
    /// deletion; users already deleted stay deleted.
    #[instrument(skip(self, cancel), fields(group_id = %group_id))]
    pub async fn delete_group_recursive(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let users = self.list_users(group_id, UserListFilter::default(), cancel).await?;
        debug!(users = users.len(), "deleting group members");

        for user in &users {
            if cancel.is_cancelled() {
                return Err(HyperStoreError::Cancelled)
                    .with_context(|| format!("delete group {group_id} recursively"));
            }
            self.delete_user(&user.key(), cancel).await?;
        }

        self.delete_group(group_id, cancel).await
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// List the users of a group, following pagination to the end.
    #[instrument(skip(self, filter, cancel), fields(group_id = %group_id))]
    pub async fn list_users(
        &self,
        group_id: &str,
        filter: UserListFilter,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>> {
        let users = collect_pages(self.list_limit, cancel, |page| {
            let mut request = ApiRequest::get(USER_LIST_PATH)
                .query("groupId", group_id)
                .query("userType", filter.user_type_param())
                .query("userStatus", filter.user_status_param())
                .query("limit", page.limit.to_string());
            if let Some(offset) = page.offset_param() {
                request = request.query("offset", offset);
            }

            async move {
                let response = self.call(request, None, cancel).await?;
                if response.is_empty() {
                    return Ok(Vec::new());
                }
                decode::<Vec<UserWire>>(&response.body)?
                    .into_iter()
                    .map(user_to_internal)
                    .collect::<Result<Vec<_>>>()
            }
        })
        .await
        .with_context(|| format!("list users of group {group_id}"))?;

        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    /// Fetch a user by key.
    ///
    /// # Errors
    /// `NotFound` (possibly wrapped) if the user does not exist.
    #[instrument(skip(self, user, cancel), fields(user = %user))]
    pub async fn get_user(&self, user: &UserRef, cancel: &CancellationToken) -> Result<User> {
        in_context(|| format!("get user {user}"), async {
            let key = user.to_string();
            let request = ApiRequest::get(USER_PATH)
                .query("userId", &user.user_id)
                .query("groupId", &user.group_id);
            let response = self.call(request, Some(Lookup::new("user", &key)), cancel).await?;
            user_to_internal(decode::<UserWire>(&response.body)?)
        })
        .await
    }

    #[instrument(skip(self, user, cancel), fields(user = %user.key()))]
    pub async fn create_user(&self, user: &User, cancel: &CancellationToken) -> Result<()> {
        in_context(|| format!("create user {}", user.key()), async {
            user.validate()?;
            let request = ApiRequest::put(USER_PATH).json(to_json(&user_to_wire(user))?);
            self.call(request, None, cancel).await?;
            info!("user created");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, user, cancel), fields(user = %user))]
    pub async fn delete_user(&self, user: &UserRef, cancel: &CancellationToken) -> Result<()> {
        in_context(|| format!("delete user {user}"), async {
            let request = ApiRequest::delete(USER_PATH)
                .query("userId", &user.user_id)
                .query("groupId", &user.group_id);
            self.call(request, None, cancel).await?;
            info!("user deleted");
            Ok(())
        })
        .await
    }

    // ------------------------------------------------------------------
    // Credentials
    // ------------------------------------------------------------------

    /// Create a new access/secret key pair for a user.
    #[instrument(skip(self, user, cancel), fields(user = %user))]
    pub async fn create_user_credentials(
        &self,
        user: &UserRef,
        cancel: &CancellationToken,
    ) -> Result<SecurityInfo> {
        in_context(|| format!("create credentials for user {user}"), async {
            let request = ApiRequest::put(CREDENTIALS_PATH)
                .query("userId", &user.user_id)
                .query("groupId", &user.group_id);
            let response = self.call(request, None, cancel).await?;
            let info = credentials_to_internal(decode::<SecurityInfoWire>(&response.body)?);
            info!(access_key = %info.access_key, "credentials created");
            Ok(info)
        })
        .await
    }

    /// Fetch a key pair by access key.
    ///
    /// # Errors
    /// `NotFound` (possibly wrapped) if no such access key exists.
    #[instrument(skip(self, cancel), fields(access_key = %access_key))]
    pub async fn get_user_credentials(
        &self,
        access_key: &str,
        cancel: &CancellationToken,
    ) -> Result<SecurityInfo> {
        in_context(|| format!("get credentials {access_key}"), async {
            let request = ApiRequest::get(CREDENTIALS_PATH).query("accessKey", access_key);
            let lookup = Lookup::new("credentials", access_key);
            let response = self.call(request, Some(lookup), cancel).await?;
            Ok(credentials_to_internal(decode::<SecurityInfoWire>(&response.body)?))
        })
        .await
    }

    /// List every key pair of a user. A user without keys yields an empty list.
    #[instrument(skip(self, user, cancel), fields(user = %user))]
    pub async fn list_user_credentials(
        &self,
        user: &UserRef,
        cancel: &CancellationToken,
    ) -> Result<Vec<SecurityInfo>> {
        in_context(|| format!("list credentials of user {user}"), async {
            let request = ApiRequest::get(CREDENTIALS_LIST_PATH)
                .query("userId", &user.user_id)
                .query("groupId", &user.group_id);
            let response = self.call(request, None, cancel).await?;
            if response.is_empty() {
                return Ok(Vec::new());
            }
            Ok(decode::<Vec<SecurityInfoWire>>(&response.body)?
                .into_iter()
                .map(credentials_to_internal)
                .collect())
        })
        .await
    }

    #[instrument(skip(self, cancel), fields(access_key = %access_key))]
    pub async fn delete_user_credentials(
        &self,
        access_key: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        in_context(|| format!("delete credentials {access_key}"), async {
            let request = ApiRequest::delete(CREDENTIALS_PATH).query("accessKey", access_key);
            self.call(request, None, cancel).await?;
            info!("credentials deleted");
            Ok(())
        })
        .await
    }

    // ------------------------------------------------------------------
    // QoS
    // ------------------------------------------------------------------

    /// Read the hard limits of a user, or a group's defaults.
    ///
    /// # Errors
    /// `NotFound` (possibly wrapped) if the API has no limits for the target.
    #[instrument(skip(self, target, cancel), fields(target = %target))]
    pub async fn get_qos(&self, target: &QosTarget, cancel: &CancellationToken) -> Result<QoS> {
        in_context(|| format!("get qos {target}"), async {
            let key = target.to_string();
            let request = ApiRequest::get(QOS_PATH)
                .query("userId", target.user_id())
                .query("groupId", target.group_id());
            let response = self.call(request, Some(Lookup::new("qos", &key)), cancel).await?;
            qos_to_internal(decode::<QosWire>(&response.body)?)
        })
        .await
    }

    /// Replace the limits of a user, or a group's defaults. Warning levels are
    /// derived from the hard levels.
    #[instrument(skip(self, target, qos, cancel), fields(target = %target))]
    pub async fn set_qos(
        &self,
        target: &QosTarget,
        qos: &QoS,
        cancel: &CancellationToken,
    ) -> Result<()> {
        in_context(|| format!("set qos {target}"), async {
            let request = ApiRequest::post(QOS_PATH).query_pairs(qos_query_map(target, qos));
            self.call(request, None, cancel).await?;
            info!("qos limits set");
            Ok(())
        })
        .await
    }
}

/// Run one operation and annotate its error with `context`.
async fn in_context<T, C, F>(context: C, operation: F) -> Result<T>
where
    C: FnOnce() -> String,
    F: Future<Output = Result<T>>,
{
    operation.await.with_context(context)
}

fn to_json<T: Serialize>(wire: &T) -> Result<serde_json::Value> {
    serde_json::to_value(wire).map_err(|e| InfraError::from(e).into())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use hyperstore_core::HttpMethod;
    use hyperstore_domain::{is_not_found, ErrorCategory, LdapConfig};

    use super::*;

    /// Replays canned responses and records requests.
    struct ScriptedTransport {
        responses: Mutex<Vec<ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        fn new(mut responses: Vec<ApiResponse>) -> Arc<Self> {
            responses.reverse();
            Arc::new(Self { responses: Mutex::new(responses), requests: Mutex::new(Vec::new()) })
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(
            &self,
            request: ApiRequest,
            cancel: &CancellationToken,
        ) -> Result<ApiResponse> {
            if cancel.is_cancelled() {
                return Err(HyperStoreError::Cancelled);
            }
            self.requests.lock().unwrap().push(request);
            Ok(self.responses.lock().unwrap().pop().unwrap_or_else(|| ApiResponse::new(200, "")))
        }
    }

    fn client(transport: Arc<ScriptedTransport>, limit: i64) -> HyperStoreClient {
        HyperStoreClient::with_transport(transport, ListLimit::new(limit).unwrap())
    }

    #[tokio::test]
    async fn get_group_empty_body_is_wrapped_not_found() {
        let transport = ScriptedTransport::new(vec![ApiResponse::new(204, "")]);
        let client = client(transport, 100);

        let err = client.get_group("QA", &CancellationToken::new()).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(is_not_found(&err));
        assert_eq!(err.to_string(), "get group QA: group not found: QA");
    }

    #[tokio::test]
    async fn list_users_sends_filter_and_paging_params() {
        let transport = ScriptedTransport::new(vec![
            ApiResponse::new(
                200,
                r#"[{"userId":"a","groupId":"QA"},{"userId":"b","groupId":"QA"},{"userId":"c","groupId":"QA"}]"#,
            ),
            ApiResponse::new(200, r#"[{"userId":"c","groupId":"QA"}]"#),
        ]);
        let client = client(transport.clone(), 2);

        let users = client
            .list_users("QA", UserListFilter::default(), &CancellationToken::new())
            .await
            .unwrap();

        let ids: Vec<_> = users.iter().map(|u| u.user_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path, "/user/list");
        assert_eq!(requests[0].query_param("userType"), Some("all"));
        assert_eq!(requests[0].query_param("userStatus"), Some("all"));
        assert_eq!(requests[0].query_param("limit"), Some("2"));
        assert_eq!(requests[0].query_param("offset"), None);
        assert_eq!(requests[1].query_param("offset"), Some("2"));
    }

    #[tokio::test]
    async fn delete_group_recursive_deletes_users_first() {
        let transport = ScriptedTransport::new(vec![
            ApiResponse::new(
                200,
                r#"[{"userId":"a","groupId":"QA"},{"userId":"b","groupId":"QA"}]"#,
            ),
            ApiResponse::new(200, ""),
            ApiResponse::new(200, ""),
            ApiResponse::new(200, ""),
        ]);
        let client = client(transport.clone(), 100);

        client.delete_group_recursive("QA", &CancellationToken::new()).await.unwrap();

        let calls: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| {
                let user_id = r.query_param("userId").map(str::to_string);
                (r.method, r.path, user_id)
            })
            .collect();
        assert_eq!(
            calls,
            vec![
                (HttpMethod::Get, "/user/list".to_string(), None),
                (HttpMethod::Delete, "/user".to_string(), Some("a".to_string())),
                (HttpMethod::Delete, "/user".to_string(), Some("b".to_string())),
                (HttpMethod::Delete, "/group".to_string(), None),
            ]
        );
    }

    #[tokio::test]
    async fn create_group_sends_wire_body() {
        let transport = ScriptedTransport::new(vec![ApiResponse::new(200, "")]);
        let client = client(transport.clone(), 100);

        client.create_group(&Group::new("QA"), &CancellationToken::new()).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Put);
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["groupId"], "QA");
        assert_eq!(body["active"], "true");
    }

    #[tokio::test]
    async fn incomplete_enabled_ldap_is_rejected_before_sending() {
        let transport = ScriptedTransport::new(Vec::new());
        let client = client(transport.clone(), 100);
        let group = Group::new("QA").with_ldap(LdapConfig {
            enabled: true,
            group: "admins".into(),
            ..Default::default()
        });

        let create = client.create_group(&group, &CancellationToken::new()).await.unwrap_err();
        let update = client.update_group(&group, &CancellationToken::new()).await.unwrap_err();

        assert_eq!(create.category(), ErrorCategory::Validation);
        assert!(create.to_string().starts_with("create group QA: Invalid input"));
        assert!(create.to_string().contains("ldapMatchAttribute"));
        assert_eq!(update.category(), ErrorCategory::Validation);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn user_without_group_is_rejected_before_sending() {
        let transport = ScriptedTransport::new(Vec::new());
        let client = client(transport.clone(), 100);

        let err = client
            .create_user(&User::new("", "alice"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_not_found());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn disabled_ldap_with_partial_settings_is_sent() {
        let transport = ScriptedTransport::new(vec![ApiResponse::new(200, "")]);
        let client = client(transport.clone(), 100);
        let group = Group::new("QA")
            .with_ldap(LdapConfig { group: "admins".into(), ..Default::default() });

        client.update_group(&group, &CancellationToken::new()).await.unwrap();

        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body["ldapEnabled"], false);
        assert_eq!(body["ldapGroup"], "admins");
    }

    #[tokio::test]
    async fn validation_errors_keep_operation_context() {
        let transport =
            ScriptedTransport::new(vec![ApiResponse::new(409, r#"{"reason":"exists"}"#)]);
        let client = client(transport, 100);

        let err = client.create_user(&User::new("QA", "alice"), &CancellationToken::new()).await;

        let err = err.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.to_string(), "create user QA/alice: Validation error (409): exists");
    }

    #[tokio::test]
    async fn list_credentials_empty_body_is_empty_list() {
        let transport = ScriptedTransport::new(vec![ApiResponse::new(204, "")]);
        let client = client(transport, 100);

        let keys = client
            .list_user_credentials(&UserRef::new("QA", "alice"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn cancelled_operation_reports_cancelled() {
        let transport = ScriptedTransport::new(Vec::new());
        let client = client(transport.clone(), 100);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client.delete_group_recursive("QA", &cancel).await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Cancelled);
        assert!(transport.requests().is_empty());
    }
}
