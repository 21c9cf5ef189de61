//! Weighted CART decision tree for binary classification.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Decision tree configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    /// Minimum samples a node needs before it may be split
    pub min_samples_split: usize,
    /// Minimum samples on each side of a split
    pub min_samples_leaf: usize,
    /// Maximum depth (None = grow until pure or too small)
    pub max_depth: Option<usize>,
    /// Features drawn per split (None = all)
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_depth: None,
            max_features: None,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        probability_up: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Training rows shared by every node of one fit.
struct TrainingData<'a> {
    features: &'a [Vec<f64>],
    labels: &'a [u8],
    weights: &'a [f64],
    n_features: usize,
}

impl TrainingData<'_> {
    /// Weighted (down, up) mass of the given rows
    fn class_weights(&self, indices: &[usize]) -> (f64, f64) {
        indices.iter().fold((0.0, 0.0), |(down, up), &i| {
            if self.labels[i] == 1 {
                (down, up + self.weights[i])
            } else {
                (down + self.weights[i], up)
            }
        })
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn gini(down: f64, up: f64) -> f64 {
    let total = down + up;
    if total <= 0.0 {
        return 0.0;
    }
    let p_down = down / total;
    let p_up = up / total;
    1.0 - p_down * p_down - p_up * p_up
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<Node>,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self { config, root: None }
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Fit on the rows listed in `sample`, each weighted by `weights[row]`.
    pub fn fit(&mut self, features: &[Vec<f64>], labels: &[u8], weights: &[f64], sample: &[usize]) {
        let data = TrainingData {
            features,
            labels,
            weights,
            n_features: features.first().map_or(0, Vec::len),
        };
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut indices = sample.to_vec();
        self.root = Some(self.build(&data, &mut indices, 0, &mut rng));
    }

    /// Weighted fraction of Up samples in the leaf `row` falls into.
    pub fn predict_probability(&self, row: &[f64]) -> Option<f64> {
        let mut node = self.root.as_ref()?;
        loop {
            match node {
                Node::Leaf { probability_up } => return Some(*probability_up),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        self.root.as_ref().map_or(0, depth_of)
    }

    fn build(
        &self,
        data: &TrainingData<'_>,
        indices: &mut [usize],
        depth: usize,
        rng: &mut StdRng,
    ) -> Node {
        let (down, up) = data.class_weights(indices);
        let total = down + up;
        let probability_up = if total > 0.0 { up / total } else { 0.5 };
        let leaf = Node::Leaf { probability_up };

        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);
        if indices.len() < self.config.min_samples_split
            || indices.len() < 2 * self.config.min_samples_leaf.max(1)
            || down == 0.0
            || up == 0.0
            || depth_reached
        {
            return leaf;
        }

        let Some(best) = self.best_split(data, indices, gini(down, up), rng) else {
            return leaf;
        };

        // Partition in place: rows going left first
        let mut boundary = 0;
        for k in 0..indices.len() {
            if data.features[indices[k]][best.feature] <= best.threshold {
                indices.swap(k, boundary);
                boundary += 1;
            }
        }
        if boundary == 0 || boundary == indices.len() {
            return leaf;
        }

        let (left_rows, right_rows) = indices.split_at_mut(boundary);
        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(self.build(data, left_rows, depth + 1, rng)),
            right: Box::new(self.build(data, right_rows, depth + 1, rng)),
        }
    }

    /// Scans features in random order. At least `max_features` are examined;
    /// the scan keeps going past that only while no valid split has been found.
    fn best_split(
        &self,
        data: &TrainingData<'_>,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut StdRng,
    ) -> Option<SplitCandidate> {
        let max_features = self
            .config
            .max_features
            .unwrap_or(data.n_features)
            .clamp(1, data.n_features.max(1));
        let min_leaf = self.config.min_samples_leaf.max(1);

        let mut candidates: Vec<usize> = (0..data.n_features).collect();
        candidates.shuffle(rng);

        let mut best: Option<SplitCandidate> = None;
        let mut order = indices.to_vec();

        for (visited, &feature) in candidates.iter().enumerate() {
            if visited >= max_features && best.is_some() {
                break;
            }

            order.sort_by(|&a, &b| data.features[a][feature].total_cmp(&data.features[b][feature]));

            let (total_down, total_up) = data.class_weights(&order);
            let total = total_down + total_up;
            let (mut left_down, mut left_up) = (0.0, 0.0);

            for k in 0..order.len() - 1 {
                let row = order[k];
                if data.labels[row] == 1 {
                    left_up += data.weights[row];
                } else {
                    left_down += data.weights[row];
                }

                let value = data.features[row][feature];
                let next_value = data.features[order[k + 1]][feature];
                if next_value <= value {
                    continue;
                }

                let left_count = k + 1;
                if left_count < min_leaf || order.len() - left_count < min_leaf {
                    continue;
                }

                let left_weight = left_down + left_up;
                let right_down = total_down - left_down;
                let right_up = total_up - left_up;
                let right_weight = right_down + right_up;
                let impurity = (left_weight * gini(left_down, left_up)
                    + right_weight * gini(right_down, right_up))
                    / total;

                if impurity >= parent_impurity {
                    continue;
                }
                if best.as_ref().is_none_or(|b| impurity < b.impurity) {
                    let mut threshold = value + (next_value - value) / 2.0;
                    if threshold >= next_value || !threshold.is_finite() {
                        threshold = value;
                    }
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        impurity,
                    });
                }
            }
        }

        best
    }
}
