use hashbrown::HashMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// User id → md5 password hash that already passed a bcrypt check.
pub type PasswordCache = TtlCache<i64, String>;

/// Safe username → user id.
pub type NameCache = TtlCache<String, i64>;

/// In-process map whose entries are forgotten once `ttl` has passed,
/// so renames and password changes are picked up without a restart.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, (V, Instant)>>,
}

impl<K: Hash + Eq, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = self.entries.read().ok()?;
        match entries.get(key) {
            Some((value, inserted_at)) if inserted_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn insert(&self, key: K, value: V) {
        if let Ok(mut entries) = self.entries.write() {
            let ttl = self.ttl;
            entries.retain(|_, (_, inserted_at)| inserted_at.elapsed() < ttl);
            entries.insert(key, (value, Instant::now()));
        }
    }
}

impl PasswordCache {
    pub fn is_verified(&self, user_id: i64, password_md5: &str) -> bool {
        self.get(&user_id)
            .is_some_and(|cached| cached == password_md5)
    }
}
