//! Unconstrained minimum arrangement solvers.
//!
//! Both algorithms recurse on the subtrees around a centroidal vertex and
//! lay components out in disjoint blocks of positions. The recursion is
//! driven here by an explicit frame stack, with a scratch forest that has
//! edges removed and added back as components split and rejoin.

use log::debug;

use crate::tree::FreeTree;

/// Algorithm choice for the unconstrained solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnconstrainedAlgorithm {
    /// Shiloach's algorithm (1979), with the corrections of Esteban and
    /// Ferrer-i-Cancho. Picks the better of an anchored split and a
    /// wrap-around split at every component.
    #[default]
    Shiloach,
    /// Chung's algorithm (1984). Tries every candidate subtree next to the
    /// central tree over a placement vector.
    Chung,
}

/// How a component hangs from the rest of the tree: not at all, or through
/// an edge leaving its interval to the left or to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Free,
    Left,
    Right,
}

/// Mutable scratch forest over the input tree's vertices.
struct Forest {
    adj: Vec<Vec<usize>>,
    // Epoch-stamped visited marks, so scans never clear the whole array.
    visited: Vec<u32>,
    epoch: u32,
    size: Vec<usize>,
    parent: Vec<usize>,
}

impl Forest {
    fn new(tree: &FreeTree) -> Self {
        let n = tree.num_nodes();
        Forest {
            adj: (0..n).map(|u| tree.neighbors(u).to_vec()).collect(),
            visited: vec![0; n],
            epoch: 0,
            size: vec![0; n],
            parent: vec![0; n],
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) {
        self.adj[u].push(v);
        self.adj[v].push(u);
    }

    fn remove_edge(&mut self, u: usize, v: usize) {
        Self::detach(&mut self.adj[u], v);
        Self::detach(&mut self.adj[v], u);
    }

    fn detach(list: &mut Vec<usize>, w: usize) {
        for i in 0..list.len() {
            if list[i] == w {
                list.swap_remove(i);
                return;
            }
        }
        unreachable!("removing an edge that is not in the forest");
    }

    /// Vertices of the component containing `v`, in BFS order.
    fn component(&mut self, v: usize) -> Vec<usize> {
        self.epoch += 1;
        self.visited[v] = self.epoch;
        let mut order = vec![v];
        let mut head = 0;
        while head < order.len() {
            let u = order[head];
            head += 1;
            for &w in &self.adj[u] {
                if self.visited[w] != self.epoch {
                    self.visited[w] = self.epoch;
                    order.push(w);
                }
            }
        }
        order
    }

    /// Fills `self.size` and `self.parent` for the component of `root`,
    /// rooted at `root`, and returns the component in BFS order.
    fn sizes_from(&mut self, root: usize) -> Vec<usize> {
        self.epoch += 1;
        self.visited[root] = self.epoch;
        self.parent[root] = root;
        let mut order = vec![root];
        let mut head = 0;
        while head < order.len() {
            let u = order[head];
            head += 1;
            for &w in &self.adj[u] {
                if self.visited[w] != self.epoch {
                    self.visited[w] = self.epoch;
                    self.parent[w] = u;
                    order.push(w);
                }
            }
        }
        for &w in &order {
            self.size[w] = 1;
        }
        for &w in order.iter().rev() {
            if w != root {
                let p = self.parent[w];
                let s = self.size[w];
                self.size[p] += s;
            }
        }
        order
    }

    /// A centroidal vertex of the component containing `v`: descend from `v`
    /// towards the unique subtree holding more than half of the component,
    /// stopping when there is none.
    fn centroid_of(&mut self, v: usize) -> usize {
        let order = self.sizes_from(v);
        let total = order.len();
        let mut u = v;
        loop {
            let mut heavy = None;
            for &w in &self.adj[u] {
                if self.parent[w] == u && 2 * self.size[w] > total {
                    heavy = Some(w);
                    break;
                }
            }
            match heavy {
                Some(w) => u = w,
                None => return u,
            }
        }
    }

    /// Subtrees hanging from `v_star` in its component as `(size, node)`
    /// pairs, largest first. Equal sizes keep ascending node order.
    fn ordering(&mut self, v_star: usize) -> Vec<(usize, usize)> {
        self.sizes_from(v_star);
        let mut ord: Vec<(usize, usize)> =
            self.adj[v_star].iter().map(|&u| (self.size[u], u)).collect();
        ord.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        ord
    }
}

/// Mirrors a component inside its interval when an anchored layout left the
/// anchor vertex on the wrong half of it.
fn flip_if_needed(
    anchor: Anchor,
    pos: &mut [usize],
    component: &[usize],
    vertex: usize,
    start: usize,
    size: usize,
) {
    let misplaced = match anchor {
        Anchor::Right => 2 * (pos[vertex] - start) < size - 1,
        Anchor::Left => 2 * (pos[vertex] - start) > size - 1,
        Anchor::Free => false,
    };
    if misplaced {
        for &w in component {
            pos[w] = 2 * start + size - 1 - pos[w];
        }
    }
}

// ------------------------------------------------------------------------
// Shiloach

enum YsPhase {
    Enter,
    JoinA,
    JoinB,
}

struct YsFrame {
    caller: Option<usize>,
    anchor: Anchor,
    vertex: usize,
    start: usize,
    end: usize,
    phase: YsPhase,
    size: usize,
    v_star: usize,
    ord: Vec<(usize, usize)>,
    component: Vec<usize>,
    /// Sum of the costs of the children spawned by the current phase.
    acc: u64,
    cost_a: u64,
    /// Anchor lengths the wrap-around layout adds on top of its children.
    s_b: u64,
    b_edges: usize,
    /// Positions of the A layout, parallel to `component`.
    saved: Vec<usize>,
}

impl YsFrame {
    fn new(caller: Option<usize>, anchor: Anchor, vertex: usize, start: usize, end: usize) -> Self {
        YsFrame {
            caller,
            anchor,
            vertex,
            start,
            end,
            phase: YsPhase::Enter,
            size: 0,
            v_star: 0,
            ord: Vec::new(),
            component: Vec::new(),
            acc: 0,
            cost_a: 0,
            s_b: 0,
            b_edges: 0,
            saved: Vec::new(),
        }
    }
}

fn finish_ys(frames: &mut Vec<YsFrame>, total: &mut u64, cost: u64) {
    let Some(f) = frames.pop() else {
        unreachable!("finishing with an empty frame stack");
    };
    match f.caller {
        Some(i) => frames[i].acc += cost,
        None => *total = cost,
    }
}

/// How many subtree pairs the wrap-around (B) layout may place around the
/// central tree, and the anchor cost those pairs add. Returns `(0, 0)` when
/// the wrap-around layout is not worth considering.
fn wrap_pairs(size: usize, ord: &[(usize, usize)], anchored: bool) -> (usize, u64) {
    let k = ord.len() - 1;
    let n_0 = ord[0].0;
    if !anchored {
        let mut max_p = k / 2;
        if max_p == 0 {
            return (0, 0);
        }
        let mut sum: usize = ord[..=2 * max_p].iter().map(|e| e.0).sum();
        let mut n_star = size - sum;
        let mut tricky = (n_0 + 2) / 2 + (n_star + 2) / 2;
        let mut n_p = ord[2 * max_p].0;
        while max_p > 0 && n_p <= tricky {
            sum -= ord[2 * max_p].0 + ord[2 * max_p - 1].0;
            max_p -= 1;
            n_star = size - sum;
            tricky = (n_0 + 2) / 2 + (n_star + 2) / 2;
            if max_p > 0 {
                n_p = ord[2 * max_p].0;
            }
        }
        if max_p == 0 {
            return (0, 0);
        }
        let mut s = (max_p as u64) * ((n_star + 1 + n_0) as u64);
        for i in 1..max_p {
            s += (i as u64) * ((ord[2 * i + 1].0 + ord[2 * i + 2].0) as u64);
        }
        (max_p, s)
    } else {
        let mut max_p = (k + 1) / 2;
        if max_p == 0 {
            return (0, 0);
        }
        let mut sum: usize = ord[..=2 * max_p - 1].iter().map(|e| e.0).sum();
        let mut n_star = size - sum;
        let mut tricky = (n_0 + 2) / 2 + (n_star + 2) / 2;
        let mut n_p = ord[2 * max_p - 1].0;
        while max_p > 0 && n_p <= tricky {
            sum -= ord[2 * max_p - 1].0 + ord[2 * max_p - 2].0;
            max_p -= 1;
            n_star = size - sum;
            tricky = (n_0 + 2) / 2 + (n_star + 2) / 2;
            if max_p > 0 {
                n_p = ord[2 * max_p - 1].0;
            }
        }
        if max_p == 0 {
            return (0, 0);
        }
        let mut s = (max_p as u64) * ((n_star + 1 + n_0) as u64) - 1;
        for i in 1..max_p {
            s += (i as u64) * ((ord[2 * i].0 + ord[2 * i + 1].0) as u64);
        }
        (max_p, s)
    }
}

fn shiloach(tree: &FreeTree) -> (u64, Vec<usize>) {
    let n = tree.num_nodes();
    let mut forest = Forest::new(tree);
    let mut pos = vec![0usize; n];
    let mut total = 0u64;
    let mut frames = vec![YsFrame::new(None, Anchor::Free, 0, 0, n - 1)];

    while let Some(top) = frames.len().checked_sub(1) {
        match frames[top].phase {
            YsPhase::Enter => {
                let (anchor, vertex, start, end) = {
                    let f = &frames[top];
                    (f.anchor, f.vertex, f.start, f.end)
                };
                let component = forest.component(vertex);
                let size = component.len();
                if size == 1 {
                    pos[vertex] = start;
                    finish_ys(&mut frames, &mut total, 0);
                    continue;
                }
                let v_star = if anchor == Anchor::Free {
                    forest.centroid_of(vertex)
                } else {
                    vertex
                };
                let ord = forest.ordering(v_star);
                let (n_0, v_0) = ord[0];
                forest.remove_edge(v_star, v_0);
                {
                    let f = &mut frames[top];
                    f.size = size;
                    f.v_star = v_star;
                    f.ord = ord;
                    f.component = component;
                    f.phase = YsPhase::JoinA;
                }
                // A layout: the largest subtree on the far side of the anchor,
                // the rest of the component next to it.
                if anchor == Anchor::Left {
                    frames.push(YsFrame::new(Some(top), Anchor::Free, v_star, start, end - n_0));
                    frames.push(YsFrame::new(Some(top), Anchor::Left, v_0, end - n_0 + 1, end));
                } else {
                    frames.push(YsFrame::new(Some(top), Anchor::Right, v_0, start, start + n_0 - 1));
                    let rest = if anchor == Anchor::Free { Anchor::Left } else { Anchor::Free };
                    frames.push(YsFrame::new(Some(top), rest, v_star, start + n_0, end));
                }
            }
            YsPhase::JoinA => {
                let (anchor, start, end, size, v_star) = {
                    let f = &frames[top];
                    (f.anchor, f.start, f.end, f.size, f.v_star)
                };
                let (n_0, v_0) = frames[top].ord[0];
                let cost_a = frames[top].acc
                    + if anchor == Anchor::Free { 1 } else { (size - n_0) as u64 };
                forest.add_edge(v_star, v_0);

                let anchored = anchor != Anchor::Free;
                let (p, s) = wrap_pairs(size, &frames[top].ord, anchored);
                if p == 0 {
                    finish_ys(&mut frames, &mut total, cost_a);
                    continue;
                }

                let saved: Vec<usize> =
                    frames[top].component.iter().map(|&w| pos[w]).collect();
                let b_edges = 2 * p - usize::from(anchored);
                for i in 1..=b_edges {
                    let (_, r) = frames[top].ord[i];
                    forest.remove_edge(v_star, r);
                }
                {
                    let f = &mut frames[top];
                    f.cost_a = cost_a;
                    f.saved = saved;
                    f.s_b = s;
                    f.b_edges = b_edges;
                    f.acc = 0;
                    f.phase = YsPhase::JoinB;
                }
                // B layout: wrap the next subtrees around the central tree,
                // anchored towards it, alternating ends.
                let mut s_pos = start;
                let mut e_pos = end;
                for i in 1..=b_edges {
                    let (n_i, r) = frames[top].ord[i];
                    let at_left = (anchor == Anchor::Left && i % 2 == 0)
                        || (anchor != Anchor::Left && i % 2 == 1);
                    if at_left {
                        frames.push(YsFrame::new(Some(top), Anchor::Right, r, s_pos, s_pos + n_i - 1));
                        s_pos += n_i;
                    } else {
                        frames.push(YsFrame::new(Some(top), Anchor::Left, r, e_pos - n_i + 1, e_pos));
                        e_pos -= n_i;
                    }
                }
                frames.push(YsFrame::new(Some(top), Anchor::Free, v_star, s_pos, e_pos));
            }
            YsPhase::JoinB => {
                let cost_b = frames[top].acc + frames[top].s_b;
                let cost_a = frames[top].cost_a;
                let v_star = frames[top].v_star;
                for i in 1..=frames[top].b_edges {
                    let (_, r) = frames[top].ord[i];
                    forest.add_edge(v_star, r);
                }
                if cost_b < cost_a {
                    // trace!("wrap-around layout wins: {} < {}", cost_b, cost_a);
                    finish_ys(&mut frames, &mut total, cost_b);
                } else {
                    let f = &frames[top];
                    for (k, &w) in f.component.iter().enumerate() {
                        pos[w] = f.saved[k];
                    }
                    finish_ys(&mut frames, &mut total, cost_a);
                }
            }
        }
    }
    (total, pos)
}

// ------------------------------------------------------------------------
// Chung

enum FcPhase {
    Enter,
    JoinPair,
    Trial,
    JoinTrial,
}

struct FcFrame {
    caller: Option<usize>,
    anchor: Anchor,
    vertex: usize,
    start: usize,
    phase: FcPhase,
    size: usize,
    center: usize,
    ord: Vec<(usize, usize)>,
    component: Vec<usize>,
    /// Wrap width: `q` for a free component, `p` for an anchored one.
    limit: usize,
    trials: usize,
    size_rest: usize,
    trial_idx: usize,
    placement: Vec<usize>,
    acc: u64,
    pair_extra: u64,
    best_cost: u64,
    /// Positions of the best trial, parallel to `component`.
    best_pos: Vec<usize>,
}

impl FcFrame {
    fn new(caller: Option<usize>, anchor: Anchor, vertex: usize, start: usize) -> Self {
        FcFrame {
            caller,
            anchor,
            vertex,
            start,
            phase: FcPhase::Enter,
            size: 0,
            center: 0,
            ord: Vec::new(),
            component: Vec::new(),
            limit: 0,
            trials: 0,
            size_rest: 0,
            trial_idx: 0,
            placement: Vec::new(),
            acc: 0,
            pair_extra: 0,
            best_cost: 0,
            best_pos: Vec::new(),
        }
    }
}

fn finish_fc(frames: &mut Vec<FcFrame>, total: &mut u64, cost: u64) {
    let Some(f) = frames.pop() else {
        unreachable!("finishing with an empty frame stack");
    };
    match f.caller {
        Some(i) => frames[i].acc += cost,
        None => *total = cost,
    }
}

/// Number of subtree pairs wrapped around the central tree of a free
/// component, or `None` when splitting off the largest subtree is better.
fn wrap_count_free(size: usize, ord: &[(usize, usize)]) -> Option<usize> {
    let k = ord.len() - 1;
    let t_0 = ord[0].0;
    let mut q = k / 2;
    let mut z = size - ord[..=2 * q].iter().map(|e| e.0).sum::<usize>();
    let mut tricky = (t_0 + 2) / 2 + (z + 2) / 2;
    let mut t_2q = ord[2 * q].0;
    while t_2q <= tricky {
        z += ord[2 * q].0;
        if q > 0 {
            z += ord[2 * q - 1].0;
        }
        tricky = (t_0 + 2) / 2 + (z + 2) / 2;
        if q == 0 {
            return None;
        }
        q -= 1;
        t_2q = ord[2 * q].0;
    }
    Some(q)
}

/// Anchored counterpart of [`wrap_count_free`]: the wrapped subtrees pair up
/// with one extra tree next to the anchor.
fn wrap_count_anchored(size: usize, ord: &[(usize, usize)]) -> Option<usize> {
    if ord.len() < 2 {
        return None;
    }
    let k = ord.len() - 1;
    let t_0 = ord[0].0;
    let mut p = (k - 1) / 2;
    let mut y = size - ord[..=2 * p + 1].iter().map(|e| e.0).sum::<usize>();
    let mut tricky = (t_0 + 2) / 2 + (y + 2) / 2;
    let mut t_odd = ord[2 * p + 1].0;
    while t_odd <= tricky {
        y += ord[2 * p + 1].0 + ord[2 * p].0;
        tricky = (t_0 + 2) / 2 + (y + 2) / 2;
        if p == 0 {
            return None;
        }
        p -= 1;
        t_odd = ord[2 * p + 1].0;
    }
    Some(p)
}

/// Distributes the ord indices `0..=slots` except `skip` over the 1-based
/// slots `1..=slots`, filling the outermost free slot on alternating ends.
/// Slot 0 is unused.
fn placement_vector(slots: usize, skip: usize) -> Vec<usize> {
    let mut v = vec![0usize; slots + 1];
    let mut right = slots;
    let mut left = 1;
    let mut pos = right;
    let mut j = 0;
    while j <= slots {
        if j == skip {
            j += 1;
            continue;
        }
        v[pos] = j;
        if pos > left {
            right -= 1;
            pos = left;
        } else {
            left += 1;
            pos = right;
        }
        j += 1;
    }
    v
}

fn chung(tree: &FreeTree) -> (u64, Vec<usize>) {
    let n = tree.num_nodes();
    let mut forest = Forest::new(tree);
    let mut pos = vec![0usize; n];
    let mut total = 0u64;
    let mut frames = vec![FcFrame::new(None, Anchor::Free, 0, 0)];

    while let Some(top) = frames.len().checked_sub(1) {
        match frames[top].phase {
            FcPhase::Enter => {
                let (anchor, vertex, start) = {
                    let f = &frames[top];
                    (f.anchor, f.vertex, f.start)
                };
                let component = forest.component(vertex);
                let size = component.len();
                if size == 1 {
                    pos[vertex] = start;
                    finish_fc(&mut frames, &mut total, 0);
                    continue;
                }
                let center = if anchor == Anchor::Free {
                    forest.centroid_of(vertex)
                } else {
                    vertex
                };
                let ord = forest.ordering(center);
                let width = if anchor == Anchor::Free {
                    wrap_count_free(size, &ord)
                } else {
                    wrap_count_anchored(size, &ord)
                };
                match width {
                    None => {
                        // Split off the largest subtree; the rest keeps the
                        // anchor semantics of this component.
                        let (n_0, t_0) = ord[0];
                        forest.remove_edge(center, t_0);
                        let pair_extra =
                            if anchor == Anchor::Free { 1 } else { (size - n_0) as u64 };
                        {
                            let f = &mut frames[top];
                            f.size = size;
                            f.center = center;
                            f.ord = ord;
                            f.component = component;
                            f.pair_extra = pair_extra;
                            f.phase = FcPhase::JoinPair;
                        }
                        let rest =
                            if anchor == Anchor::Free { Anchor::Left } else { Anchor::Free };
                        frames.push(FcFrame::new(Some(top), Anchor::Right, t_0, start));
                        frames.push(FcFrame::new(Some(top), rest, center, start + n_0));
                    }
                    Some(limit) => {
                        let trials =
                            if anchor == Anchor::Free { 2 * limit + 1 } else { 2 * limit + 2 };
                        for i in 0..trials {
                            forest.remove_edge(center, ord[i].1);
                        }
                        let size_rest: usize = ord[trials..].iter().map(|e| e.0).sum();
                        let f = &mut frames[top];
                        f.size = size;
                        f.center = center;
                        f.ord = ord;
                        f.component = component;
                        f.limit = limit;
                        f.trials = trials;
                        f.size_rest = size_rest;
                        f.trial_idx = 0;
                        f.best_cost = u64::MAX;
                        f.phase = FcPhase::Trial;
                    }
                }
            }
            FcPhase::JoinPair => {
                let cost = frames[top].acc + frames[top].pair_extra;
                let center = frames[top].center;
                let (_, t_0) = frames[top].ord[0];
                forest.add_edge(center, t_0);
                let f = &frames[top];
                flip_if_needed(f.anchor, &mut pos, &f.component, f.vertex, f.start, f.size);
                finish_fc(&mut frames, &mut total, cost);
            }
            FcPhase::Trial => {
                let (anchor, center, start, limit, size_rest, i) = {
                    let f = &frames[top];
                    (f.anchor, f.center, f.start, f.limit, f.size_rest, f.trial_idx)
                };
                let slots = if anchor == Anchor::Free { 2 * limit } else { 2 * limit + 1 };
                let placement = placement_vector(slots, i);
                let (n_i, t_i) = frames[top].ord[i];
                forest.add_edge(center, t_i);
                {
                    let f = &mut frames[top];
                    f.placement = placement;
                    f.acc = 0;
                    f.phase = FcPhase::JoinTrial;
                }
                // Left wing, central tree, right wing; every piece starts
                // where the previous one ends.
                let mut sa = start;
                for j in 1..=limit {
                    let oi = frames[top].placement[j];
                    let (n_j, r_j) = frames[top].ord[oi];
                    frames.push(FcFrame::new(Some(top), Anchor::Right, r_j, sa));
                    sa += n_j;
                }
                frames.push(FcFrame::new(Some(top), Anchor::Free, center, sa));
                sa += n_i + 1 + size_rest;
                for j in limit + 1..=slots {
                    let oi = frames[top].placement[j];
                    let (n_j, r_j) = frames[top].ord[oi];
                    frames.push(FcFrame::new(Some(top), Anchor::Left, r_j, sa));
                    sa += n_j;
                }
            }
            FcPhase::JoinTrial => {
                let (anchor, center, limit, size, i) = {
                    let f = &frames[top];
                    (f.anchor, f.center, f.limit, f.size, f.trial_idx)
                };
                let mut c_i = frames[top].acc;
                {
                    let f = &frames[top];
                    // Anchor lengths over the trees nearer to the central one.
                    if anchor == Anchor::Free {
                        c_i += (size as u64) * (limit as u64);
                    } else {
                        c_i += (size as u64) * ((limit + 1) as u64);
                        c_i -= ((limit + 1) as u64)
                            * (f.ord[f.placement[f.placement.len() - 1]].0 as u64);
                    }
                    let mut subs = 0u64;
                    for j in 1..=limit {
                        subs += ((limit - j + 1) as u64)
                            * ((f.ord[f.placement[j]].0 + f.ord[f.placement[2 * limit - j + 1]].0)
                                as u64);
                    }
                    c_i -= subs;
                    c_i += limit as u64;
                }
                if c_i < frames[top].best_cost {
                    let best: Vec<usize> =
                        frames[top].component.iter().map(|&w| pos[w]).collect();
                    let f = &mut frames[top];
                    f.best_cost = c_i;
                    f.best_pos = best;
                }
                let t_i = frames[top].ord[i].1;
                forest.remove_edge(center, t_i);
                if i + 1 < frames[top].trials {
                    let f = &mut frames[top];
                    f.trial_idx = i + 1;
                    f.phase = FcPhase::Trial;
                } else {
                    for idx in 0..frames[top].trials {
                        let (_, r) = frames[top].ord[idx];
                        forest.add_edge(center, r);
                    }
                    let f = &frames[top];
                    for (k, &w) in f.component.iter().enumerate() {
                        pos[w] = f.best_pos[k];
                    }
                    flip_if_needed(f.anchor, &mut pos, &f.component, f.vertex, f.start, f.size);
                    let best_cost = f.best_cost;
                    finish_fc(&mut frames, &mut total, best_cost);
                }
            }
        }
    }
    (total, pos)
}

pub(crate) fn solve(tree: &FreeTree, algorithm: UnconstrainedAlgorithm) -> (u64, Vec<usize>) {
    let n = tree.num_nodes();
    if n == 1 {
        return (0, vec![0]);
    }
    debug!("unconstrained solver: n = {}, algorithm = {:?}", n, algorithm);
    match algorithm {
        UnconstrainedAlgorithm::Shiloach => shiloach(tree),
        UnconstrainedAlgorithm::Chung => chung(tree),
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::arrangement::LinearArrangement;
    use crate::linarr::sum_edge_lengths;

    const BOTH: [UnconstrainedAlgorithm; 2] =
        [UnconstrainedAlgorithm::Shiloach, UnconstrainedAlgorithm::Chung];

    /// The returned positions must form a permutation whose cost matches the
    /// reported one.
    fn checked_cost(tree: &FreeTree, algorithm: UnconstrainedAlgorithm) -> u64 {
        let (cost, pos) = solve(tree, algorithm);
        let arr = LinearArrangement::from_direct(pos).unwrap();
        assert_eq!(sum_edge_lengths(tree, Some(&arr)).unwrap(), cost);
        cost
    }

    fn path(n: usize) -> FreeTree {
        let edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        FreeTree::from_edges(n, &edges).unwrap()
    }

    fn star(leaves: usize) -> FreeTree {
        let edges: Vec<_> = (1..=leaves).map(|v| (0, v)).collect();
        FreeTree::from_edges(leaves + 1, &edges).unwrap()
    }

    #[test]
    fn test_singleton() {
        let tree = FreeTree::from_edges(1, &[]).unwrap();
        for algorithm in BOTH {
            assert_eq!(solve(&tree, algorithm), (0, vec![0]));
        }
    }

    #[test]
    fn test_single_edge() {
        let tree = path(2);
        for algorithm in BOTH {
            assert_eq!(checked_cost(&tree, algorithm), 1);
        }
    }

    #[test]
    fn test_path_costs_length() {
        for n in 2..=12 {
            let tree = path(n);
            for algorithm in BOTH {
                assert_eq!(checked_cost(&tree, algorithm), (n - 1) as u64, "path {}", n);
            }
        }
    }

    #[test]
    fn test_star() {
        // k leaves around the center cost 1, 1, 2, 2, 3, 3, ...
        for k in 1..=8 {
            let tree = star(k);
            let expected: u64 = (1..=k as u64).map(|i| i.div_ceil(2)).sum();
            for algorithm in BOTH {
                assert_eq!(checked_cost(&tree, algorithm), expected, "star {}", k);
            }
        }
    }

    #[test]
    fn test_algorithms_agree() {
        let trees = [
            // caterpillar: spine 0-1-2-3 with leaves 4, 5 on 1 and 2
            FreeTree::from_edges(6, &[(0, 1), (1, 2), (2, 3), (1, 4), (2, 5)]).unwrap(),
            // spider with three legs of length two
            FreeTree::from_edges(7, &[(0, 1), (1, 2), (0, 3), (3, 4), (0, 5), (5, 6)]).unwrap(),
            // complete binary tree on 7 vertices
            FreeTree::from_edges(7, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)]).unwrap(),
            // double star: centers 0-1 with three leaves each
            FreeTree::from_edges(8, &[(0, 1), (0, 2), (0, 3), (0, 4), (1, 5), (1, 6), (1, 7)])
                .unwrap(),
        ];
        for tree in &trees {
            let a = checked_cost(tree, UnconstrainedAlgorithm::Shiloach);
            let b = checked_cost(tree, UnconstrainedAlgorithm::Chung);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_not_above_planar() {
        use crate::dmin::planar::{self, PlanarAlgorithm};
        let trees = [
            path(9),
            star(6),
            FreeTree::from_edges(7, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)]).unwrap(),
        ];
        for tree in &trees {
            let (planar_cost, _) = planar::solve(tree, PlanarAlgorithm::AlemanyEstebanFerrer);
            for algorithm in BOTH {
                assert!(checked_cost(tree, algorithm) <= planar_cost);
            }
        }
    }
}
