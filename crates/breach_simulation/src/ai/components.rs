//! AI components: alertness, behavioral state, transient цели

use bevy::prelude::*;

/// Marker: боец под управлением AI
///
/// Автоматически добавляет весь AI bundle через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Alertness,
    AiState,
    StateChangedAt,
    PatrolRoute,
    HeardSound,
    MoveTarget,
    PlayerContact
)]
pub struct AiControlled;

/// Порог alertness для Search state
pub const SEARCH_THRESHOLD: f32 = 0.8;
/// Порог alertness для Investigate state (требует pending heard-sound)
pub const INVESTIGATE_THRESHOLD: f32 = 0.5;
/// Порог alertness для Alert state
pub const ALERT_THRESHOLD: f32 = 0.2;

/// Осведомлённость агента об угрозе
///
/// Инвариант: value ∈ [0, 1] после любой последовательности raise/decay.
/// NaN-вход игнорируется (события приходят от внешних caller'ов).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Alertness {
    value: f32,
}

impl Alertness {
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Поднять alertness (clamp до 1.0)
    pub fn raise(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.value = (self.value + amount).min(1.0);
    }

    /// Спад alertness (clamp до 0.0)
    pub fn decay(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.value = (self.value - amount).max(0.0);
    }

    /// Мгновенный максимум (визуальный контакт)
    pub fn set_full(&mut self) {
        self.value = 1.0;
    }

    #[cfg(test)]
    pub fn with_value(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
        }
    }
}

/// Behavioral state AI агента
///
/// Ровно один state активен; переход — чистая функция от alertness
/// и свежих visibility/sound свидетельств.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum AiState {
    /// Обход патрульных точек (угроз нет)
    #[default]
    Patrol,
    /// Что-то было — осматриваемся вокруг
    Alert,
    /// Идём к последнему услышанному звуку
    Investigate,
    /// Активный поиск вокруг последней известной позиции protagonist'а
    Search,
    /// Прямой контакт: прицел + огонь + stand-off дистанция
    Attack,
}

impl AiState {
    /// Выбор state по alertness-порогам (сверху вниз, первый match)
    ///
    /// Attack сюда не попадает — его форсирует visibility до спада.
    /// При alertness ≥ 0.5 без pending звука проваливаемся в Alert.
    pub fn from_alertness(alertness: f32, heard_pending: bool) -> AiState {
        if alertness >= SEARCH_THRESHOLD {
            AiState::Search
        } else if alertness >= INVESTIGATE_THRESHOLD && heard_pending {
            AiState::Investigate
        } else if alertness >= ALERT_THRESHOLD {
            AiState::Alert
        } else {
            AiState::Patrol
        }
    }
}

/// Момент последнего state transition (секунды от старта симуляции)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct StateChangedAt {
    pub at: f32,
}

/// Патрульный маршрут: упорядоченные waypoint'ы + курсор
///
/// Пустой маршрут — валидный вход: Patrol behavior будет no-op
/// (агент держит позицию), не ошибка.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub points: Vec<Vec2>,
    pub current: usize,
}

impl PatrolRoute {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points, current: 0 }
    }

    /// Текущий waypoint (None для пустого маршрута)
    pub fn current_point(&self) -> Option<Vec2> {
        self.points.get(self.current).copied()
    }

    /// Переход к следующему waypoint'у с wrap-around
    pub fn advance(&mut self) {
        if !self.points.is_empty() {
            self.current = (self.current + 1) % self.points.len();
        }
    }
}

/// Последняя услышанная локация звука (transient)
///
/// Перезаписывается каждым новым услышанным звуком; очищается
/// Investigate behavior'ом по прибытии.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct HeardSound(pub Option<Vec2>);

/// Текущая цель движения Alert/Search behavior'ов (transient)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MoveTarget(pub Option<Vec2>);

/// Результат visibility запроса против protagonist'а
///
/// `visible` — свежий ответ oracle за этот тик; `last_known` —
/// последняя позиция player'а, когда его было видно (якорь Search).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerContact {
    pub visible: bool,
    pub last_known: Option<Vec2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alertness_clamped() {
        let mut alertness = Alertness::default();

        alertness.raise(0.7);
        alertness.raise(0.7);
        assert_eq!(alertness.value(), 1.0);

        alertness.decay(0.4);
        assert!((alertness.value() - 0.6).abs() < 1e-6);

        alertness.decay(5.0);
        assert_eq!(alertness.value(), 0.0);
    }

    #[test]
    fn test_alertness_ignores_nan() {
        let mut alertness = Alertness::with_value(0.5);
        alertness.raise(f32::NAN);
        alertness.decay(f32::NAN);
        alertness.raise(-1.0);
        assert_eq!(alertness.value(), 0.5);
    }

    #[test]
    fn test_state_selection_thresholds() {
        assert_eq!(AiState::from_alertness(0.9, false), AiState::Search);
        assert_eq!(AiState::from_alertness(0.8, false), AiState::Search);

        // 0.6 + pending sound → Investigate; без звука проваливаемся в Alert
        assert_eq!(AiState::from_alertness(0.6, true), AiState::Investigate);
        assert_eq!(AiState::from_alertness(0.6, false), AiState::Alert);

        assert_eq!(AiState::from_alertness(0.3, false), AiState::Alert);
        assert_eq!(AiState::from_alertness(0.1, true), AiState::Patrol);
        assert_eq!(AiState::from_alertness(0.0, false), AiState::Patrol);
    }

    #[test]
    fn test_patrol_route_wraps() {
        let mut route = PatrolRoute::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
        ]);

        assert_eq!(route.current_point(), Some(Vec2::new(0.0, 0.0)));
        route.advance();
        route.advance();
        assert_eq!(route.current_point(), Some(Vec2::new(100.0, 100.0)));
        route.advance();
        assert_eq!(route.current_point(), Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_empty_route() {
        let mut route = PatrolRoute::default();
        assert_eq!(route.current_point(), None);
        route.advance(); // Не паникует
        assert_eq!(route.current, 0);
    }
}
