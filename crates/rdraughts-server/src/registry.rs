//! 対局レジストリ
//!
//! 対局は `MatchId` で引く。マップ自体のロックは検索・登録の間だけ保持し、
//! 指し手の適用は対局ごとのロック（`MatchSlot::game`）で直列化する。
//! 別々の対局への操作は互いにブロックしない。

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rdraughts_core::{Color, Match};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// 対局 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1 局分の状態
#[derive(Debug)]
pub struct MatchSlot {
    game: Mutex<Match>,
    created_at: DateTime<Utc>,
}

impl MatchSlot {
    fn new() -> Self {
        MatchSlot {
            game: Mutex::new(Match::started()),
            created_at: Utc::now(),
        }
    }

    /// 対局のロックを取る。別スレッドが保持中に panic していても
    /// 対局状態は指し手単位で整合しているため、そのまま回収する。
    pub fn lock(&self) -> MutexGuard<'_, Match> {
        self.game.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("match lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 一覧表示用の対局概要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub created_at: DateTime<Utc>,
    pub current_player: Color,
    pub game_over: bool,
    pub winner: Option<Color>,
}

/// 対局レジストリ
#[derive(Debug)]
pub struct MatchRegistry {
    matches: Mutex<HashMap<MatchId, Arc<MatchSlot>>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl MatchRegistry {
    pub fn new(capacity: usize) -> Self {
        MatchRegistry {
            matches: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            capacity,
        }
    }

    fn map(&self) -> MutexGuard<'_, HashMap<MatchId, Arc<MatchSlot>>> {
        self.matches.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 初期配置の対局を新規登録する
    ///
    /// 上限に達しているときは終局済みの対局のうち最も古いものを 1 つ破棄して
    /// 空きを作る。終局済みの対局がなければ `RegistryFull`。
    pub fn create(&self) -> Result<MatchId, ApiError> {
        let mut map = self.map();
        if map.len() >= self.capacity {
            let Some(evicted) = oldest_finished(&map) else {
                return Err(ApiError::RegistryFull(self.capacity));
            };
            map.remove(&evicted);
            tracing::info!(match_id = %evicted, "finished match evicted");
        }
        let id = MatchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        map.insert(id, Arc::new(MatchSlot::new()));
        tracing::info!(match_id = %id, active = map.len(), "match created");
        Ok(id)
    }

    pub fn get(&self, id: MatchId) -> Option<Arc<MatchSlot>> {
        self.map().get(&id).cloned()
    }

    /// 対局ロックを保持したまま `f` を実行する
    pub fn with_match<R>(&self, id: MatchId, f: impl FnOnce(&mut Match) -> R) -> Result<R, ApiError> {
        let slot = self.get(id).ok_or(ApiError::UnknownMatch(id))?;
        let mut game = slot.lock();
        Ok(f(&mut game))
    }

    /// 対局を破棄して新しい対局に置き換える（ID は維持）
    pub fn reset(&self, id: MatchId) -> Result<(), ApiError> {
        self.with_match(id, |game| *game = Match::started())?;
        tracing::info!(match_id = %id, "match reset");
        Ok(())
    }

    /// 対局を削除する。存在していれば true
    pub fn remove(&self, id: MatchId) -> bool {
        let removed = self.map().remove(&id).is_some();
        if removed {
            tracing::info!(match_id = %id, "match closed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 全対局の概要（ID 順）
    pub fn summaries(&self) -> Vec<MatchSummary> {
        let slots: Vec<(MatchId, Arc<MatchSlot>)> =
            self.map().iter().map(|(id, slot)| (*id, Arc::clone(slot))).collect();
        let mut out: Vec<MatchSummary> = slots
            .into_iter()
            .map(|(match_id, slot)| {
                let game = slot.lock();
                MatchSummary {
                    match_id,
                    created_at: slot.created_at(),
                    current_player: game.current_color(),
                    game_over: game.is_game_over(),
                    winner: game.winner(),
                }
            })
            .collect();
        out.sort_by_key(|s| s.match_id);
        out
    }
}

/// 終局済みの対局で ID が最小のもの。使用中（ロック中）の対局は対象外
fn oldest_finished(map: &HashMap<MatchId, Arc<MatchSlot>>) -> Option<MatchId> {
    map.iter()
        .filter(|(_, slot)| slot.game.try_lock().map(|game| game.is_game_over()).unwrap_or(false))
        .map(|(id, _)| *id)
        .min()
}

impl Default for MatchRegistry {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_MATCHES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdraughts_core::{Board, Piece, Square};

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let registry = MatchRegistry::new(4);
        let a = registry.create().unwrap();
        let b = registry.create().unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert!(registry.get(a).is_some());
        assert!(registry.get(MatchId(999)).is_none());
    }

    #[test]
    fn test_capacity_limit() {
        let registry = MatchRegistry::new(1);
        registry.create().unwrap();
        assert!(matches!(registry.create(), Err(ApiError::RegistryFull(1))));
    }

    #[test]
    fn test_full_registry_evicts_oldest_finished_match() {
        let registry = MatchRegistry::new(3);
        let a = registry.create().unwrap();
        let b = registry.create().unwrap();
        let c = registry.create().unwrap();
        // 黒の駒を全て取り除いた局面で白が勝つ
        for id in [b, c] {
            registry
                .with_match(id, |g| {
                    let mut board = Board::empty();
                    board.set_piece(sq(5, 0), Piece::Man(Color::White));
                    *g = Match::from_board(board, Color::Black);
                })
                .unwrap();
        }

        let d = registry.create().unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.get(b).is_none());
        assert!(registry.get(a).is_some());
        assert!(registry.get(c).is_some());
        assert!(registry.get(d).is_some());

        let e = registry.create().unwrap();
        assert!(registry.get(c).is_none());
        assert!(matches!(registry.create(), Err(ApiError::RegistryFull(3))));
        assert_eq!(registry.summaries().iter().map(|s| s.match_id).collect::<Vec<_>>(), vec![a, d, e]);
    }

    #[test]
    fn test_matches_are_independent() {
        let registry = MatchRegistry::new(4);
        let a = registry.create().unwrap();
        let b = registry.create().unwrap();
        assert!(registry.with_match(a, |g| g.attempt_move(sq(2, 1), sq(3, 0))).unwrap());
        assert_eq!(registry.with_match(a, |g| g.current_color()).unwrap(), Color::White);
        assert_eq!(registry.with_match(b, |g| g.current_color()).unwrap(), Color::Black);
    }

    #[test]
    fn test_reset_replaces_match() {
        let registry = MatchRegistry::new(4);
        let id = registry.create().unwrap();
        assert!(registry.with_match(id, |g| g.attempt_move(sq(2, 1), sq(3, 0))).unwrap());
        registry.reset(id).unwrap();
        let color = registry.with_match(id, |g| g.current_color()).unwrap();
        assert_eq!(color, Color::Black);
        assert!(matches!(registry.reset(MatchId(42)), Err(ApiError::UnknownMatch(_))));
    }

    #[test]
    fn test_remove() {
        let registry = MatchRegistry::new(4);
        let id = registry.create().unwrap();
        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert!(registry.is_empty());
        assert!(matches!(registry.with_match(id, |_| ()), Err(ApiError::UnknownMatch(_))));
    }

    #[test]
    fn test_summaries_sorted() {
        let registry = MatchRegistry::new(8);
        let ids: Vec<MatchId> = (0..3).map(|_| registry.create().unwrap()).collect();
        let summaries = registry.summaries();
        assert_eq!(summaries.iter().map(|s| s.match_id).collect::<Vec<_>>(), ids);
        assert!(summaries.iter().all(|s| !s.game_over && s.current_player == Color::Black));
    }

    #[test]
    fn test_concurrent_moves_are_serialized() {
        let registry = Arc::new(MatchRegistry::new(4));
        let id = registry.create().unwrap();
        // 同じ指し手を並行に送っても受理されるのは 1 回だけ
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.with_match(id, |g| g.attempt_move(sq(2, 1), sq(3, 0))).unwrap())
            })
            .collect();
        let accepted = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();
        assert_eq!(accepted, 1);
    }
}
