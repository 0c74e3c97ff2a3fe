use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, trace};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait, keys, actions)
// =============================================================================

/// Trait that any record must implement to be stored by a [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Key the actor stores the record under. Unique per collection.
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;

    // --- Custom Actions ---
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Domain-level refusal raised by creation or by an action.
    type Rejection: std::error::Error + Send + Sync + 'static;

    fn key(&self) -> Self::Key;

    /// Construct the full record from a freshly generated id and its params.
    fn from_create_params(id: String, params: Self::CreateParams) -> Result<Self, Self::Rejection>;

    /// Apply a domain action in place.
    ///
    /// Runs inside the actor loop, so the read-modify-write is atomic with
    /// respect to every other request on the same collection. An `Err` must
    /// leave `self` untouched.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Rejection>;
}

// =============================================================================
// 2. ERRORS AND GENERIC MESSAGES
// =============================================================================

/// Failures of the actor plumbing itself, independent of the stored data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("actor mailbox closed")]
    ActorClosed,
    #[error("actor dropped the reply channel")]
    ActorDropped,
    #[error("item not found: {0}")]
    NotFound(String),
}

/// Error for requests that may also be refused by the entity.
#[derive(Debug, Error)]
pub enum RequestError<R> {
    #[error(transparent)]
    Framework(#[from] FrameworkError),
    #[error("request rejected: {0}")]
    Rejected(R),
}

/// Outcome of a create request.
#[derive(Debug, Clone, PartialEq)]
pub enum Created<T> {
    /// A new record was stored.
    Inserted(T),
    /// A record with the same key already existed and was left untouched.
    Existing(T),
}

impl<T> Created<T> {
    pub fn into_inner(self) -> T {
        match self {
            Created::Inserted(item) | Created::Existing(item) => item,
        }
    }

    pub fn was_inserted(&self) -> bool {
        matches!(self, Created::Inserted(_))
    }
}

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;
pub type RejectableResponse<T, R> = oneshot::Sender<Result<T, RequestError<R>>>;
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: RejectableResponse<Created<T>, T::Rejection>,
    },
    Get {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    Save {
        item: T,
        respond_to: Response<()>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Scan {
        predicate: Predicate<T>,
        respond_to: Response<Vec<T>>,
    },
    Action {
        key: T::Key,
        action: T::Action,
        respond_to: RejectableResponse<T::ActionResult, T::Rejection>,
    },
}

impl<T: Entity> Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceRequest::Create { params, .. } => f.debug_struct("Create").field("params", params).finish(),
            ResourceRequest::Get { key, .. } => f.debug_struct("Get").field("key", key).finish(),
            ResourceRequest::Save { item, .. } => f.debug_struct("Save").field("key", &item.key()).finish(),
            ResourceRequest::List { .. } => f.write_str("List"),
            ResourceRequest::Scan { .. } => f.write_str("Scan"),
            ResourceRequest::Action { key, action, .. } => {
                f.debug_struct("Action").field("key", key).field("action", action).finish()
            }
        }
    }
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one collection and serves requests for it, one at a time.
///
/// Records are kept in insertion order so scans are deterministic.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Key, T>,
    order: Vec<T::Key>,
    next_id_fn: Box<dyn Fn() -> String + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> String + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        debug!("Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            trace!(request = ?msg, "Handling request");
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { key, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&key).cloned()));
                }
                ResourceRequest::Save { item, respond_to } => {
                    self.upsert(item);
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.scan(|_| true)));
                }
                ResourceRequest::Scan { predicate, respond_to } => {
                    let _ = respond_to.send(Ok(self.scan(predicate)));
                }
                ResourceRequest::Action { key, action, respond_to } => {
                    let result = match self.store.get_mut(&key) {
                        Some(item) => item.handle_action(action).map_err(RequestError::Rejected),
                        None => Err(FrameworkError::NotFound(key.to_string()).into()),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        debug!("Actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<Created<T>, RequestError<T::Rejection>> {
        let id = (self.next_id_fn)();
        let item = T::from_create_params(id, params).map_err(RequestError::Rejected)?;
        let key = item.key();
        if let Some(existing) = self.store.get(&key) {
            return Ok(Created::Existing(existing.clone()));
        }
        self.upsert(item.clone());
        Ok(Created::Inserted(item))
    }

    fn upsert(&mut self, item: T) {
        let key = item.key();
        if self.store.insert(key.clone(), item).is_none() {
            self.order.push(key);
        }
    }

    fn scan(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|key| self.store.get(key))
            .filter(|item| predicate(*item))
            .cloned()
            .collect()
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// Cheap, cloneable handle to a [`ResourceActor`].
///
/// Every method sends one request and awaits exactly one reply.
#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R, E>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, E>>) -> ResourceRequest<T>,
    ) -> Result<R, E>
    where
        E: From<FrameworkError>,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<Created<T>, RequestError<T::Rejection>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, key: T::Key) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { key, respond_to }).await
    }

    pub async fn save(&self, item: T) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Save { item, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn scan(
        &self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, FrameworkError> {
        let predicate: Predicate<T> = Box::new(predicate);
        self.request(|respond_to| ResourceRequest::Scan { predicate, respond_to }).await
    }

    pub async fn perform_action(
        &self,
        key: T::Key,
        action: T::Action,
    ) -> Result<T::ActionResult, RequestError<T::Rejection>> {
        self.request(|respond_to| ResourceRequest::Action { key, action, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
