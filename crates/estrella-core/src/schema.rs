use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::table::TableModel;

/// The fixed set of tables in the demographic star schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableRole {
    Continente,
    Pais,
    OficinaRegistro,
    AreaConocimiento,
    Especializacion,
    NivelAcademico,
    Genero,
    DescripcionDemografica,
}

impl TableRole {
    pub const ALL: [TableRole; 8] = [
        TableRole::Continente,
        TableRole::Pais,
        TableRole::OficinaRegistro,
        TableRole::AreaConocimiento,
        TableRole::Especializacion,
        TableRole::NivelAcademico,
        TableRole::Genero,
        TableRole::DescripcionDemografica,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            TableRole::Continente => "Continente",
            TableRole::Pais => "Pais",
            TableRole::OficinaRegistro => "OficinaRegistro",
            TableRole::AreaConocimiento => "AreaConocimiento",
            TableRole::Especializacion => "Especializacion",
            TableRole::NivelAcademico => "NivelAcademico",
            TableRole::Genero => "Genero",
            TableRole::DescripcionDemografica => "DescripcionDemografica",
        }
    }
}

/// A declared foreign key from a child table to its parent's surrogate id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FkEdge {
    pub child: TableRole,
    pub parent: TableRole,
}

const FK_EDGES: &[FkEdge] = &[
    FkEdge { child: TableRole::Pais, parent: TableRole::Continente },
    FkEdge { child: TableRole::OficinaRegistro, parent: TableRole::Pais },
    FkEdge { child: TableRole::Especializacion, parent: TableRole::AreaConocimiento },
    FkEdge { child: TableRole::DescripcionDemografica, parent: TableRole::OficinaRegistro },
    FkEdge { child: TableRole::DescripcionDemografica, parent: TableRole::NivelAcademico },
    FkEdge { child: TableRole::DescripcionDemografica, parent: TableRole::Especializacion },
    FkEdge { child: TableRole::DescripcionDemografica, parent: TableRole::Genero },
];

/// The per-run collection of table models, plus the declared FK graph and
/// the insertion order derived from it.
///
/// Built once before any row processing and passed by reference into the
/// engine and readers; there is no process-global table state.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    tables: BTreeMap<TableRole, TableModel>,
    insertion_order: Vec<TableRole>,
}

impl SchemaRegistry {
    pub fn new() -> Result<Self> {
        let mut tables = BTreeMap::new();

        tables.insert(
            TableRole::Continente,
            TableModel::new("Continente", &["id", "codigo", "nombre"], "codigo", true)?,
        );
        tables.insert(
            TableRole::Pais,
            TableModel::new(
                "Pais",
                &["id", "id_Continente", "codigo", "nombre"],
                "codigo",
                true,
            )?,
        );
        tables.insert(
            TableRole::OficinaRegistro,
            TableModel::new("OficinaRegistro", &["id", "id_Pais", "nombre"], "nombre", true)?,
        );
        tables.insert(
            TableRole::AreaConocimiento,
            TableModel::new("AreaConocimiento", &["id", "nombre"], "nombre", true)?,
        );
        tables.insert(
            TableRole::Especializacion,
            TableModel::new(
                "Especializacion",
                &["id", "nombre", "id_AreaConocimiento"],
                "nombre",
                true,
            )?,
        );
        tables.insert(
            TableRole::NivelAcademico,
            TableModel::new("NivelAcademico", &["id", "nombre"], "nombre", true)?,
        );
        tables.insert(
            TableRole::Genero,
            TableModel::new("Genero", &["id", "nombre"], "nombre", true)?,
        );
        tables.insert(
            TableRole::DescripcionDemografica,
            TableModel::new(
                "DescripcionDemografica",
                &[
                    "id",
                    "id_OficinaRegistro",
                    "id_NivelAcademico",
                    "id_Especializacion",
                    "id_Genero",
                    "edad",
                    "estatura",
                    "cantidad_personas",
                ],
                "id",
                true,
            )?,
        );

        let insertion_order = toposort(&tables, FK_EDGES)?;
        Ok(Self {
            tables,
            insertion_order,
        })
    }

    /// Roles in dependency order: every parent strictly before any child
    /// that references it.
    pub fn insertion_order(&self) -> &[TableRole] {
        &self.insertion_order
    }

    pub fn fk_edges(&self) -> &'static [FkEdge] {
        FK_EDGES
    }

    pub fn table(&self, role: TableRole) -> &TableModel {
        &self.tables[&role]
    }

    pub fn table_mut(&mut self, role: TableRole) -> &mut TableModel {
        self.tables.get_mut(&role).expect("registry holds every role")
    }

    pub fn table_by_name(&self, name: &str) -> Option<&TableModel> {
        self.tables.values().find(|table| table.name() == name)
    }
}

/// Kahn's algorithm over the declared edges; ties break on role order so the
/// result is deterministic.
fn toposort(tables: &BTreeMap<TableRole, TableModel>, edges: &[FkEdge]) -> Result<Vec<TableRole>> {
    let mut indegree: BTreeMap<TableRole, usize> = tables.keys().map(|role| (*role, 0)).collect();
    let mut children: BTreeMap<TableRole, Vec<TableRole>> = BTreeMap::new();

    for edge in edges {
        *indegree.entry(edge.child).or_insert(0) += 1;
        children.entry(edge.parent).or_default().push(edge.child);
    }

    let mut ready: BTreeSet<TableRole> = indegree
        .iter()
        .filter_map(|(role, count)| (*count == 0).then_some(*role))
        .collect();

    let mut order = Vec::with_capacity(tables.len());
    while let Some(role) = ready.iter().next().copied() {
        ready.remove(&role);
        order.push(role);

        if let Some(dependents) = children.get(&role) {
            for child in dependents {
                if let Some(count) = indegree.get_mut(child) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(*child);
                    }
                }
            }
        }
    }

    if order.len() != tables.len() {
        let stuck: Vec<String> = indegree
            .into_iter()
            .filter_map(|(role, count)| (count > 0).then(|| role.table_name().to_string()))
            .collect();
        return Err(Error::CyclicSchema(stuck.join(", ")));
    }

    Ok(order)
}
