// Copyright contributors to the Pauli Grouping project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;
use std::fmt::Debug;

use log::debug;

use crate::GroupingError;

/// Key every clique by its representative, merging cliques that reduce to the same key.
///
/// Members of merged cliques agree with the shared representative at each of their
/// non-identity positions, so the merged group is still measurable in one setting.
pub(crate) fn group_by_representative<K: Ord + Clone + Debug>(
    cover: Vec<Vec<K>>,
    representative: impl Fn(&[K]) -> Option<K>,
) -> Result<BTreeMap<K, Vec<K>>, GroupingError> {
    let mut groups: BTreeMap<K, Vec<K>> = BTreeMap::new();
    for clique in cover.into_iter().filter(|c| !c.is_empty()) {
        let key = representative(&clique)
            .ok_or_else(|| GroupingError::IncompatibleGroup(format!("{clique:?}")))?;
        match groups.get_mut(&key) {
            Some(members) => {
                debug!("Merging clique into existing group {key:?}");
                members.extend(clique);
            }
            None => {
                groups.insert(key, clique);
            }
        }
    }
    Ok(groups)
}
