use super::cluster::LineCluster;
use crate::filaments::{ClusterRef, FilamentId, FilamentStore};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Slot of a cluster within a [`ClusterForest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub u32);

impl ClusterId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena of the clusters built during one detection pass.
///
/// Merged clusters stay in the arena with their `parent` set; the live
/// clusters are the roots of this union-find forest.
#[derive(Clone, Debug, Default)]
pub struct ClusterForest {
    clusters: Vec<LineCluster>,
}

impl ClusterForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, id: ClusterId) -> &LineCluster {
        &self.clusters[id.index()]
    }

    pub fn get_mut(&mut self, id: ClusterId) -> &mut LineCluster {
        &mut self.clusters[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineCluster> {
        self.clusters.iter()
    }

    /// Ids of the clusters that have not been merged into another one.
    pub fn roots(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.clusters
            .iter()
            .filter(|c| c.parent().is_none())
            .map(LineCluster::key)
    }

    /// Top ancestor of `id`, i.e. the live cluster it has been merged into.
    pub fn ancestor(&self, id: ClusterId) -> ClusterId {
        let mut current = id;
        while let Some(parent) = self.clusters[current.index()].parent() {
            current = parent;
        }
        current
    }

    /// True when both clusters denote the same staff.
    pub fn same_staff(&self, a: ClusterId, b: ClusterId) -> bool {
        self.ancestor(a) == self.ancestor(b)
    }

    /// Cluster currently holding `fil` (through its filament ancestor).
    pub fn cluster_of(&self, store: &FilamentStore, fil: FilamentId) -> Option<ClusterId> {
        let root = store.ancestor(fil);
        store
            .filament(root)
            .cluster()
            .map(|r| self.ancestor(r.cluster))
    }

    /// Grow a cluster from `seed`: the seed ancestor is placed at position 0
    /// and every filament reachable through unprocessed combs is absorbed.
    ///
    /// When the seed already belongs to a cluster nothing is created and the
    /// live cluster holding it is returned.
    pub fn create(&mut self, store: &mut FilamentStore, seed: FilamentId, interline: i32) -> ClusterId {
        let root = store.ancestor(seed);
        if let Some(existing) = self.cluster_of(store, root) {
            return existing;
        }

        let key = ClusterId(self.clusters.len() as u32);
        let mut cluster = LineCluster::new(key, seed, interline);
        if store.filament(seed).is_vip() || store.filament(root).is_vip() {
            info!("VIP creating cluster with F{}", root.0);
            cluster.set_vip();
        } else {
            debug!("Creating cluster with F{}", root.0);
        }
        cluster.line_entry(0).add(root);
        store.filament_mut(root).set_cluster(Some(ClusterRef {
            cluster: key,
            position: 0,
        }));
        self.clusters.push(cluster);

        self.include_filament(store, key, root, 0);
        key
    }

    /// Absorb `pivot`, assumed at `pivot_pos` in cluster `this`, together with
    /// everything reachable from it through unprocessed combs.
    ///
    /// Each comb is marked processed before its slots are dispatched, so a
    /// comb is consumed once whatever the path that reaches it.
    pub fn include_filament(
        &mut self,
        store: &mut FilamentStore,
        this: ClusterId,
        pivot: FilamentId,
        pivot_pos: i32,
    ) {
        debug_assert!(self.get(this).parent().is_none(), "cluster already merged");

        let mut pending = vec![(pivot, pivot_pos)];
        while let Some((fil, pos)) = pending.pop() {
            if store.filament(fil).is_vip() {
                info!("VIP {} include pivot:F{} at pos:{}", self.get(this), fil.0, pos);
                self.get_mut(this).set_vip();
            }

            let combs = store.filament(fil).combs().to_vec();
            for comb in combs {
                if store.comb(comb).is_processed() {
                    continue;
                }
                store.comb_mut(comb).set_processed(true);

                let Some(index) = store.comb_index_of(comb, fil) else {
                    continue;
                };
                let delta_pos = pos - index as i32;
                debug!("Comb#{} deltaPos:{}", comb.0, delta_pos);

                let slots = store.comb(comb).filaments().to_vec();
                for (i, slot) in slots.into_iter().enumerate() {
                    let target = i as i32 + delta_pos;
                    let member = store.ancestor(slot);
                    match store.filament(member).cluster() {
                        None => {
                            self.get_mut(this).line_entry(target).add(member);
                            if store.filament(member).is_vip() {
                                info!("VIP adding F{} to {} at pos {}", member.0, self.get(this), target);
                                self.get_mut(this).set_vip();
                            }
                            store.filament_mut(member).set_cluster(Some(ClusterRef {
                                cluster: this,
                                position: target,
                            }));
                            pending.push((member, target));
                        }
                        Some(ClusterRef { cluster, position }) => {
                            let other = self.ancestor(cluster);
                            if other != self.ancestor(this) {
                                self.include_cluster(store, this, other, target - position);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Merge cluster `that` into `this`: position `k` of `that` becomes
    /// position `k + delta_pos` of `this`, and `that` is marked as merged.
    ///
    /// Both ids are resolved to their live roots first; nothing happens when
    /// they already denote the same staff.
    pub fn include_cluster(
        &mut self,
        store: &mut FilamentStore,
        this: ClusterId,
        that: ClusterId,
        delta_pos: i32,
    ) {
        let this = self.ancestor(this);
        let that = self.ancestor(that);
        if this == that {
            return;
        }
        let (moved, that_vip) = {
            let other = self.get(that);
            if self.get(this).is_vip() || other.is_vip() {
                info!("VIP inclusion of {} into {} deltaPos:{}", other, self.get(this), delta_pos);
            }
            let moved: Vec<(i32, _)> = other
                .positioned_lines()
                .map(|(pos, line)| (pos, line.clone()))
                .collect();
            (moved, other.is_vip())
        };

        let target = self.get_mut(this);
        for (pos, line) in moved {
            let new_pos = pos + delta_pos;
            target.line_entry(new_pos).include(&line);
            for &member in line.members() {
                let fil = store.filament_mut(member);
                if fil.cluster().is_some_and(|r| r.cluster == that) {
                    fil.set_cluster(Some(ClusterRef {
                        cluster: this,
                        position: new_pos,
                    }));
                }
            }
        }
        if that_vip {
            target.set_vip();
        }
        target.invalidate_cache();
        self.get_mut(that).set_parent(this);

        debug!("Merged:{}", self.get(that));
        debug!("Merger:{}", self.get(this));
    }

    /// Merge `that` into `this` with `delta_pos` expressed between their first
    /// lines rather than between raw positions.
    pub fn merge_with(
        &mut self,
        store: &mut FilamentStore,
        this: ClusterId,
        that: ClusterId,
        delta_pos: i32,
    ) {
        let this = self.ancestor(this);
        let that = self.ancestor(that);
        let this_first = self.get(this).first_position().unwrap_or(0);
        let that_first = self.get(that).first_position().unwrap_or(0);
        self.include_cluster(store, this, that, delta_pos + (this_first - that_first));
    }

    /// Detach all filaments still linked to cluster `id`.
    pub fn destroy(&self, store: &mut FilamentStore, id: ClusterId) {
        self.get(id).destroy(store);
    }
}
