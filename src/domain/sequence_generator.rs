//! 刺激序列生成器
//!
//! 为单个模态生成固定长度的刺激序列，并按比例注入 N-back 匹配

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 默认匹配比例（百分比）
pub const DEFAULT_MATCH_PERCENTAGE: u32 = 30;

/// 最小字母表大小，低于此值时无法避免巧合匹配
const MIN_ALPHABET_SIZE: u32 = 2;

/// 序列生成参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceConfig {
    /// 序列长度
    pub length: usize,
    /// 字母表大小，取值范围 [1, alphabet_size]
    pub alphabet_size: u32,
    /// 目标匹配比例 (0 - 100)
    pub match_percentage: u32,
    /// 回溯步数
    pub n_back: usize,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            length: 10,
            alphabet_size: 9,
            match_percentage: DEFAULT_MATCH_PERCENTAGE,
            n_back: 2,
        }
    }
}

impl SequenceConfig {
    /// 有 N-back 前驱的位置数量
    pub fn eligible_positions(&self) -> usize {
        if self.n_back == 0 || self.n_back >= self.length {
            0
        } else {
            self.length - self.n_back
        }
    }

    /// 强制匹配数量: round(eligible * percentage / 100)
    pub fn forced_matches(&self) -> usize {
        let percentage = self.match_percentage.min(100) as f64;
        let eligible = self.eligible_positions() as f64;
        (eligible * percentage / 100.0).round() as usize
    }
}

/// 序列生成器
///
/// 指定 seed 时所有调用共享同一个随机源：同一 seed 的生成器产生相同的序列流，
/// 但每次调用都会推进随机源，连续两局不会重复。未指定时每次调用使用线程随机源
#[derive(Debug, Default)]
pub struct SequenceGenerator {
    seed: Option<u64>,
    rng: Option<Mutex<StdRng>>,
}

impl SequenceGenerator {
    pub fn new() -> Self {
        Self {
            seed: None,
            rng: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// 生成一条序列
    pub fn generate(&self, config: &SequenceConfig) -> Vec<u32> {
        self.generate_many(std::slice::from_ref(config))
            .pop()
            .unwrap_or_default()
    }

    /// 为多个模态生成序列，各模态依次从同一随机源取值
    pub fn generate_many(&self, configs: &[SequenceConfig]) -> Vec<Vec<u32>> {
        match &self.rng {
            Some(rng) => {
                // 锁中毒时沿用其中的随机源状态
                let mut rng = rng.lock().unwrap_or_else(|e| e.into_inner());
                configs
                    .iter()
                    .map(|config| generate_sequence(config, &mut *rng))
                    .collect()
            }
            None => {
                let mut rng = rand::rng();
                configs
                    .iter()
                    .map(|config| generate_sequence(config, &mut rng))
                    .collect()
            }
        }
    }
}

/// 使用给定随机源生成序列
///
/// 规则：
/// 1. 从 [n_back, length) 中无放回地随机选取 `forced_matches()` 个位置作为匹配
/// 2. 匹配位置取 n_back 步之前的值
/// 3. 其余有前驱的位置刻意避开前驱的值，保证实际匹配率等于声明的比例
/// 4. n_back >= length 时不存在可匹配位置，返回纯随机序列
pub fn generate_sequence<R: Rng + ?Sized>(config: &SequenceConfig, rng: &mut R) -> Vec<u32> {
    let alphabet_size = config.alphabet_size.max(MIN_ALPHABET_SIZE);
    let length = config.length;
    let n_back = config.n_back;

    let eligible = config.eligible_positions();
    let mut is_match = vec![false; length];
    if eligible > 0 {
        let forced = config.forced_matches().min(eligible);
        for offset in rand::seq::index::sample(rng, eligible, forced) {
            is_match[n_back + offset] = true;
        }
    }

    let mut sequence: Vec<u32> = Vec::with_capacity(length);
    for i in 0..length {
        let value = if eligible == 0 || i < n_back {
            rng.random_range(1..=alphabet_size)
        } else if is_match[i] {
            sequence[i - n_back]
        } else {
            random_excluding(rng, alphabet_size, sequence[i - n_back])
        };
        sequence.push(value);
    }

    tracing::trace!(
        length = length,
        alphabet_size = alphabet_size,
        n_back = n_back,
        forced = is_match.iter().filter(|m| **m).count(),
        "Sequence generated"
    );

    sequence
}

/// 在 [1, alphabet_size] 中均匀选取一个不等于 `excluded` 的值
fn random_excluding<R: Rng + ?Sized>(rng: &mut R, alphabet_size: u32, excluded: u32) -> u32 {
    let value = rng.random_range(1..alphabet_size);
    if value >= excluded {
        value + 1
    } else {
        value
    }
}

/// 统计 sequence[i] == sequence[i - n_back] 的位置数
pub fn count_matches(sequence: &[u32], n_back: usize) -> usize {
    if n_back == 0 || n_back >= sequence.len() {
        return 0;
    }
    (n_back..sequence.len())
        .filter(|&i| sequence[i] == sequence[i - n_back])
        .count()
}
