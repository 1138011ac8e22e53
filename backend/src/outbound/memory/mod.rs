//! In-memory board store.
//!
//! One mutex guards users, lists and items together, so each repository call
//! is atomic with respect to every other call. Identifiers are assigned from
//! monotonically increasing counters starting at 1 and are never reused.
//!
//! Referential integrity matches the SQL schema: a list must name an existing
//! user, and an item must name an existing user and list.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ItemPersistenceError, ItemRepository, ListPersistenceError, ListRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    BoardList, Item, ItemId, ListId, ListWithItems, NewItem, NewList, NewUser, User, UserAccount,
    UserId,
};

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, UserAccount>,
    user_order: Vec<UserId>,
    lists: BTreeMap<i64, BoardList>,
    items: BTreeMap<i64, Item>,
    next_list_id: i64,
    next_item_id: i64,
}

impl StoreState {
    fn allocate_list_id(&mut self) -> ListId {
        self.next_list_id += 1;
        ListId::new(self.next_list_id)
    }

    fn allocate_item_id(&mut self) -> ItemId {
        self.next_item_id += 1;
        ItemId::new(self.next_item_id)
    }

    fn items_of(&self, list_id: ListId) -> Vec<Item> {
        self.items
            .values()
            .filter(|item| item.list_id == list_id)
            .cloned()
            .collect()
    }
}

/// Process-local implementation of every repository port.
///
/// # Examples
/// ```
/// use taskboard::outbound::memory::InMemoryBoardStore;
///
/// let store = InMemoryBoardStore::new();
/// assert_eq!(store.user_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBoardStore {
    state: Mutex<StoreState>,
}

const POISONED: &str = "board store lock poisoned";

impl InMemoryBoardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.state.lock().map_or(0, |state| state.users.len())
    }

    fn lock(&self) -> Option<MutexGuard<'_, StoreState>> {
        self.state.lock().ok()
    }
}

#[async_trait]
impl UserRepository for InMemoryBoardStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        let taken = state
            .users
            .values()
            .any(|account| account.user.username() == &user.username);
        if taken {
            return Err(UserPersistenceError::duplicate_username(
                user.username.as_ref(),
            ));
        }
        let account = UserAccount {
            user: user.to_user(),
            password_digest: user.password_digest.clone(),
        };
        state.user_order.push(user.id);
        state.users.insert(user.id, account.clone());
        Ok(account.user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let state = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state
            .users
            .values()
            .find(|account| account.user.username().as_ref() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state.users.get(id).map(|account| account.user.clone()))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state
            .user_order
            .iter()
            .filter_map(|id| state.users.get(id))
            .map(|account| account.user.clone())
            .collect())
    }
}

#[async_trait]
impl ListRepository for InMemoryBoardStore {
    async fn create(&self, list: &NewList) -> Result<BoardList, ListPersistenceError> {
        let mut state = self.lock().ok_or_else(|| ListPersistenceError::query(POISONED))?;
        if !state.users.contains_key(&list.owner_id) {
            return Err(ListPersistenceError::missing_reference(format!(
                "user {} does not exist",
                list.owner_id
            )));
        }
        let stored = BoardList {
            id: state.allocate_list_id(),
            name: list.name.clone(),
            status: list.status,
            owner_id: list.owner_id,
        };
        state.lists.insert(stored.id.get(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ListId) -> Result<Option<BoardList>, ListPersistenceError> {
        let state = self.lock().ok_or_else(|| ListPersistenceError::query(POISONED))?;
        Ok(state.lists.get(&id.get()).cloned())
    }

    async fn update(&self, list: &BoardList) -> Result<BoardList, ListPersistenceError> {
        let mut state = self.lock().ok_or_else(|| ListPersistenceError::query(POISONED))?;
        let Some(stored) = state.lists.get_mut(&list.id.get()) else {
            return Err(ListPersistenceError::query("record not found"));
        };
        stored.name.clone_from(&list.name);
        stored.status = list.status;
        Ok(stored.clone())
    }

    async fn delete(&self, id: ListId) -> Result<(), ListPersistenceError> {
        let mut state = self.lock().ok_or_else(|| ListPersistenceError::query(POISONED))?;
        if state.items.values().any(|item| item.list_id == id) {
            return Err(ListPersistenceError::still_referenced(format!(
                "list {id} still has items"
            )));
        }
        if state.lists.remove(&id.get()).is_none() {
            return Err(ListPersistenceError::query("record not found"));
        }
        Ok(())
    }

    async fn list_all_with_items(&self) -> Result<Vec<ListWithItems>, ListPersistenceError> {
        let state = self.lock().ok_or_else(|| ListPersistenceError::query(POISONED))?;
        Ok(state
            .lists
            .values()
            .map(|list| ListWithItems {
                list: list.clone(),
                items: state.items_of(list.id),
            })
            .collect())
    }
}

#[async_trait]
impl ItemRepository for InMemoryBoardStore {
    async fn create(&self, item: &NewItem) -> Result<Item, ItemPersistenceError> {
        let mut state = self.lock().ok_or_else(|| ItemPersistenceError::query(POISONED))?;
        if !state.lists.contains_key(&item.list_id.get()) {
            return Err(ItemPersistenceError::missing_reference(format!(
                "list {} does not exist",
                item.list_id
            )));
        }
        if !state.users.contains_key(&item.owner_id) {
            return Err(ItemPersistenceError::missing_reference(format!(
                "user {} does not exist",
                item.owner_id
            )));
        }
        let stored = Item {
            id: state.allocate_item_id(),
            name: item.name.clone(),
            description: item.description.clone(),
            list_id: item.list_id,
            owner_id: item.owner_id,
        };
        state.items.insert(stored.id.get(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        let state = self.lock().ok_or_else(|| ItemPersistenceError::query(POISONED))?;
        Ok(state.items.get(&id.get()).cloned())
    }

    async fn update(&self, item: &Item) -> Result<Item, ItemPersistenceError> {
        let mut state = self.lock().ok_or_else(|| ItemPersistenceError::query(POISONED))?;
        if !state.lists.contains_key(&item.list_id.get()) {
            return Err(ItemPersistenceError::missing_reference(format!(
                "list {} does not exist",
                item.list_id
            )));
        }
        let Some(stored) = state.items.get_mut(&item.id.get()) else {
            return Err(ItemPersistenceError::query("record not found"));
        };
        stored.name.clone_from(&item.name);
        stored.description.clone_from(&item.description);
        stored.list_id = item.list_id;
        Ok(stored.clone())
    }

    async fn delete(&self, id: ItemId) -> Result<(), ItemPersistenceError> {
        let mut state = self.lock().ok_or_else(|| ItemPersistenceError::query(POISONED))?;
        match state.items.remove(&id.get()) {
            Some(_) => Ok(()),
            None => Err(ItemPersistenceError::query("record not found")),
        }
    }

    async fn delete_by_list_id(&self, list_id: ListId) -> Result<u64, ItemPersistenceError> {
        let mut state = self.lock().ok_or_else(|| ItemPersistenceError::query(POISONED))?;
        let before = state.items.len();
        state.items.retain(|_, item| item.list_id != list_id);
        Ok(u64::try_from(before - state.items.len()).unwrap_or(u64::MAX))
    }

    async fn list_by_list_id(&self, list_id: ListId) -> Result<Vec<Item>, ItemPersistenceError> {
        let state = self.lock().ok_or_else(|| ItemPersistenceError::query(POISONED))?;
        Ok(state.items_of(list_id))
    }
}
